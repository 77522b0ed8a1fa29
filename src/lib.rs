pub mod accessors;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod metrics;
pub mod paths;
pub mod registry;
pub mod store;
pub mod web;

pub use accessors::{CursorDb, Lookup};
pub use config::Config;
pub use error::{CursorDbError, ErrorKind, Result};
pub use registry::{ProjectInfo, RegistryHandle, RegistrySnapshot};
pub use store::{QueryMode, QueryRow, StoredValue, Table};
