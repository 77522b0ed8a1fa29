//! Read-only access to Cursor's SQLite key-value tables.
//!
//! Every Cursor `state.vscdb` holds two tables with the same shape
//! (`key TEXT, value BLOB`):
//!
//! - `ItemTable`: workbench/UI state, including AI chat and composer indexes
//! - `cursorDiskKV`: larger per-session blobs, mostly in the global store
//!
//! Queries open a fresh read-only connection, run exactly one statement and
//! close the connection before returning.

mod query;
mod value;

pub use query::{execute_query, lookup_key, DEFAULT_LIMIT};
pub use value::{QueryRow, StoredValue};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CursorDbError;

/// The two tables a query may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    #[serde(rename = "ItemTable")]
    ItemTable,
    #[serde(rename = "cursorDiskKV")]
    CursorDiskKv,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::ItemTable, Table::CursorDiskKv];

    /// Parse a table name (exact, case-sensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ItemTable" => Some(Self::ItemTable),
            "cursorDiskKV" => Some(Self::CursorDiskKv),
            _ => None,
        }
    }

    /// SQL identifier of the table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemTable => "ItemTable",
            Self::CursorDiskKv => "cursorDiskKV",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = CursorDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            CursorDbError::InvalidRequest(
                "Table name must be either 'ItemTable' or 'cursorDiskKV'".to_string(),
            )
        })
    }
}

/// Query modes supported by [`execute_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Up to `limit` rows in store order
    #[default]
    GetAll,
    /// The row whose key equals the given key
    GetByKey,
    /// Up to `limit` rows whose key contains the given substring
    SearchKeys,
}

impl QueryMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "get_all" => Some(Self::GetAll),
            "get_by_key" => Some(Self::GetByKey),
            "search_keys" => Some(Self::SearchKeys),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAll => "get_all",
            Self::GetByKey => "get_by_key",
            Self::SearchKeys => "search_keys",
        }
    }

    /// Whether the mode needs a key argument.
    pub fn requires_key(&self) -> bool {
        !matches!(self, Self::GetAll)
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = CursorDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            CursorDbError::InvalidRequest(format!(
                "Invalid query type '{}'. Valid options are: get_all, get_by_key, search_keys",
                s
            ))
        })
    }
}
