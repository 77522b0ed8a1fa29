//! MCP server command implementation.
//!
//! Starts the Cursor DB MCP server for integration with LLM clients.
//! Supports both stdio and HTTP/SSE transports.

use anyhow::{anyhow, Result};
use tracing::info;

use crate::accessors::CursorDb;
use crate::config::McpServerConfig;
use crate::mcp::{run_http_server, CursorDbServer, HttpTransportConfig, Transport};

/// Run the MCP server command
///
/// `transport`, `host` and `port` override the `[server.mcp]` config section.
pub async fn run(
    db: CursorDb,
    config: &McpServerConfig,
    transport: Option<&str>,
    host: Option<&str>,
    port: Option<u16>,
) -> Result<()> {
    let transport_type = match transport {
        Some(name) => Transport::parse(name).ok_or_else(|| {
            anyhow!(
                "Unknown transport type: '{}'. Valid options are: stdio, http, sse",
                name
            )
        })?,
        None => Transport::from(config.transport),
    };

    let snapshot = db.snapshot();
    info!(
        projects = snapshot.project_count(),
        global_storage = snapshot.global_db_path().is_some(),
        "Registry ready"
    );

    match transport_type {
        Transport::Stdio => {
            CursorDbServer::new(db).run().await?;
        }
        Transport::Http => {
            let http_config = HttpTransportConfig::from_config(config, host, port)?;
            run_http_server(db, http_config).await?;
        }
    }

    Ok(())
}
