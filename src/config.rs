use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_LIMIT;

const CONFIG_FILE: &str = "config.toml";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "cursor-db";
const APP_NAME: &str = "cursor-db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cursor: CursorConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where to find Cursor's databases
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Cursor `User` directory (defaults to the platform location)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Extra directories containing a `state.vscdb`
    #[serde(default)]
    pub project_dirs: Vec<PathBuf>,
}

/// Transport type for MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    /// Standard input/output transport (default)
    #[default]
    Stdio,
    /// HTTP/SSE transport for remote access
    Http,
}

impl std::fmt::Display for TransportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// HTTP API and MCP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host the HTTP API binds to
    #[serde(default = "default_http_host")]
    pub host: String,

    /// Port the HTTP API binds to
    #[serde(default = "default_api_port")]
    pub port: u16,

    #[serde(default)]
    pub mcp: McpServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_api_port(),
            mcp: McpServerConfig::default(),
        }
    }
}

/// MCP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Server transport type
    #[serde(default)]
    pub transport: TransportType,

    /// Host for the HTTP/SSE transport
    #[serde(default = "default_http_host")]
    pub host: String,

    /// Port for the HTTP/SSE transport
    #[serde(default = "default_sse_port")]
    pub port: u16,

    /// SSE endpoint path
    #[serde(default = "default_sse_path")]
    pub sse_path: String,

    /// Message endpoint path
    #[serde(default = "default_post_path")]
    pub post_path: String,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportType::default(),
            host: default_http_host(),
            port: default_sse_port(),
            sse_path: default_sse_path(),
            post_path: default_post_path(),
        }
    }
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    5000
}

fn default_sse_port() -> u16 {
    8765
}

fn default_sse_path() -> String {
    "/sse".to_string()
}

fn default_post_path() -> String {
    "/message".to_string()
}

/// Query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Row limit when a query does not give one
    #[serde(default = "default_query_limit")]
    pub default_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_query_limit(),
        }
    }
}

fn default_query_limit() -> usize {
    DEFAULT_LIMIT
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write rolling log files
    #[serde(default)]
    pub enabled: bool,

    /// Log to stderr (stdout is reserved for the MCP stdio transport)
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory; relative paths are resolved against the config directory
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// Log file name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation: hourly, daily, minutely, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_file_prefix() -> String {
    "cursor-db.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Platform configuration directory for cursor-db.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from `dir/config.toml`.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Apply command-line overrides. Explicit project directories extend the
    /// configured list.
    pub fn apply_overrides(&mut self, cursor_path: Option<PathBuf>, project_dirs: Vec<PathBuf>) {
        if cursor_path.is_some() {
            self.cursor.path = cursor_path;
        }
        for dir in project_dirs {
            if !self.cursor.project_dirs.contains(&dir) {
                self.cursor.project_dirs.push(dir);
            }
        }
    }
}
