//! HTTP/SSE transport for the Cursor DB MCP server.
//!
//! Remote MCP clients open an SSE stream on `sse_path` and post JSON-RPC
//! messages to `post_path`. Every connection gets its own
//! [`CursorDbServer`], all sharing one registry.

use anyhow::{Context, Result};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::accessors::CursorDb;
use crate::config::McpServerConfig;

use super::server::CursorDbServer;

/// Default port of the SSE transport
pub const DEFAULT_SSE_PORT: u16 = 8765;

/// Configuration for HTTP/SSE transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub bind_addr: SocketAddr,
    pub sse_path: String,
    pub post_path: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_SSE_PORT)),
            sse_path: "/sse".to_string(),
            post_path: "/message".to_string(),
        }
    }
}

impl HttpTransportConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], port)),
            ..Default::default()
        }
    }

    /// Build from the `[server.mcp]` config section, with optional
    /// command-line host and port overrides.
    pub fn from_config(
        config: &McpServerConfig,
        host: Option<&str>,
        port: Option<u16>,
    ) -> Result<Self> {
        let host = host.unwrap_or(&config.host);
        let port = port.unwrap_or(config.port);
        let bind_addr = parse_bind_addr(host, port)?;

        Ok(Self {
            bind_addr,
            sse_path: config.sse_path.clone(),
            post_path: config.post_path.clone(),
        })
    }
}

/// Parse a `host:port` pair into a socket address. `localhost` is accepted
/// as an alias for the IPv4 loopback address.
pub fn parse_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let host = if host.eq_ignore_ascii_case("localhost") {
        "127.0.0.1"
    } else {
        host
    };
    let addr = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };
    addr.parse()
        .with_context(|| format!("Invalid bind address: {}", addr))
}

/// HTTP/SSE transport for MCP server
pub struct HttpTransport {
    config: HttpTransportConfig,
    db: CursorDb,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig, db: CursorDb) -> Self {
        Self { config, db }
    }

    /// Start the HTTP/SSE server and run until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let ct = CancellationToken::new();

        let sse_config = SseServerConfig {
            bind: self.config.bind_addr,
            sse_path: self.config.sse_path.clone(),
            post_path: self.config.post_path.clone(),
            ct: ct.clone(),
            sse_keep_alive: None,
        };

        info!(
            addr = %self.config.bind_addr,
            sse_path = %self.config.sse_path,
            post_path = %self.config.post_path,
            "Starting MCP HTTP/SSE server"
        );

        let (sse_server, router) = SseServer::new(sse_config);
        let listener = tokio::net::TcpListener::bind(sse_server.config.bind)
            .await
            .with_context(|| format!("Failed to bind to {}", self.config.bind_addr))?;

        let server_ct = sse_server.config.ct.child_token();

        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            server_ct.cancelled().await;
        });

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error = %e, "HTTP/SSE server shutdown with error");
            }
        });

        let db = self.db;
        let service_ct = sse_server.with_service(move || CursorDbServer::new(db.clone()));

        info!("MCP HTTP/SSE server is ready and accepting connections");

        tokio::signal::ctrl_c().await?;
        info!("Shutdown signal received, stopping server...");

        service_ct.cancel();

        Ok(())
    }
}

/// Run the MCP server with HTTP/SSE transport.
pub async fn run_http_server(db: CursorDb, config: HttpTransportConfig) -> Result<()> {
    HttpTransport::new(config, db).run().await
}
