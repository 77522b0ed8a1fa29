//! MCP (Model Context Protocol) server for Cursor's databases.
//!
//! Exposes the registered projects as `cursor://` resources, the raw table
//! query as a tool, and a couple of canned prompts.
//!
//! ## Transport Options
//!
//! - **stdio**: Standard input/output transport for local clients (default)
//! - **http**: HTTP/SSE transport for remote access and multiple clients
//!
//! ## Usage
//!
//! ```ignore
//! use cursor_db::mcp::{CursorDbServer, HttpTransportConfig, run_http_server};
//!
//! // Stdio transport (default)
//! CursorDbServer::new(db).run().await?;
//!
//! // HTTP transport
//! run_http_server(db, HttpTransportConfig::with_port(8765)).await?;
//! ```

pub mod http;
pub mod prompts;
pub mod resources;
mod server;

pub use http::{run_http_server, HttpTransport, HttpTransportConfig};
pub use resources::CursorResource;
pub use server::{AddProjectDirectoryRequest, CursorDbServer, QueryTableRequest};

/// MCP transport type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Standard input/output transport (default)
    #[default]
    Stdio,
    /// HTTP/SSE transport for remote access
    Http,
}

impl Transport {
    /// Parse transport type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stdio" => Some(Self::Stdio),
            "http" | "sse" | "http-sse" => Some(Self::Http),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

impl From<crate::config::TransportType> for Transport {
    fn from(value: crate::config::TransportType) -> Self {
        match value {
            crate::config::TransportType::Stdio => Self::Stdio,
            crate::config::TransportType::Http => Self::Http,
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown transport type: {}", s))
    }
}
