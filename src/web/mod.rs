//! HTTP API over Cursor's databases.
//!
//! Endpoints:
//! - `GET /projects[?detailed=true]`
//! - `GET /projects/{project}/chat`
//! - `GET /projects/{project}/composers`
//! - `GET /projects/{project}/tables/{table}?query_type=&key=&limit=`
//! - `GET /composers/{composer_id}`
//! - `GET|POST /refresh`
//! - `GET /health`, `GET /metrics`
//!
//! # Example
//!
//! ```rust,ignore
//! use cursor_db::web::{AppState, WebServer};
//!
//! let server = WebServer::new(AppState::new(db));
//! server.start("127.0.0.1", 5000).await?;
//! ```

pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::mcp::http::parse_bind_addr;

/// HTTP server for the Cursor DB API.
pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// The router with CORS applied, without binding a socket.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.state.clone()).layer(cors)
    }

    /// Bind to `host:port` and serve until the process exits.
    pub async fn start(self, host: &str, port: u16) -> Result<()> {
        let addr = parse_bind_addr(host, port)?;
        let app = self.router();

        info!("Starting HTTP API at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        axum::serve(listener, app)
            .await
            .with_context(|| "HTTP API server failed")?;

        Ok(())
    }
}
