use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cursor-db")]
#[command(author, version, about = "Query server for Cursor IDE chat and workspace databases")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Cursor `User` directory (defaults to the platform location)
    #[arg(long, global = true)]
    pub cursor_path: Option<PathBuf>,

    /// Extra directories containing a state.vscdb file
    #[arg(long, global = true, num_args = 1..)]
    pub project_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server
    Serve {
        /// Transport type: stdio (default) or http
        #[arg(short, long)]
        transport: Option<String>,

        /// Host for HTTP transport (default: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP transport (default: 8765)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start the HTTP API
    Http {
        /// Host to bind to (default: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: 5000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List discovered projects
    Projects {
        /// Include workspace folder and storage details
        #[arg(short, long)]
        detailed: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Query a table of a project's database
    Query {
        /// Project name
        project: String,

        /// Table: ItemTable or cursorDiskKV
        table: String,

        /// Query type: get_all, get_by_key or search_keys
        #[arg(short = 't', long, default_value = "get_all")]
        query_type: String,

        /// Key for get_by_key, substring for search_keys
        #[arg(short, long)]
        key: Option<String>,

        /// Maximum number of rows to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print a project's AI chat data
    Chat {
        /// Project name
        project: String,
    },

    /// Print a project's composer sessions
    Composers {
        /// Project name
        project: String,
    },

    /// Print one composer session from global storage
    Composer {
        /// Composer ID
        composer_id: String,
    },
}
