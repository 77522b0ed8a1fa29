//! HTTP API command implementation.
//!
//! This module provides the `cursor-db http` command which serves the
//! project, chat, composer and table endpoints over plain HTTP.

use anyhow::Result;

use crate::accessors::CursorDb;
use crate::config::ServerConfig;
use crate::web::{AppState, WebServer};

/// Run the HTTP API server.
///
/// `host` and `port` override the `[server]` config section.
pub async fn run(
    db: CursorDb,
    config: &ServerConfig,
    host: Option<&str>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or(&config.host);
    let port = port.unwrap_or(config.port);

    if db.snapshot().project_count() == 0 {
        eprintln!("Warning: No Cursor projects found.");
        eprintln!("Use --cursor-path or --project-dirs to point at your Cursor data.\n");
    }

    let server = WebServer::new(AppState::new(db));
    server.start(host, port).await
}
