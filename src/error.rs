//! Error types for the Cursor database layer.

use thiserror::Error;

/// Errors surfaced by queries and accessors.
#[derive(Error, Debug)]
pub enum CursorDbError {
    /// No usable Cursor root or global storage database.
    #[error("{0}")]
    NotConfigured(String),

    /// Unknown project name.
    #[error("{0}")]
    NotFound(String),

    /// Unrecognised table or query type, or a missing key.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A blocking task panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by the transports to pick a response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotConfigured,
    NotFound,
    InvalidRequest,
    StorageFailure,
    Internal,
}

impl CursorDbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured(_) => ErrorKind::NotConfigured,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::Storage(_) => ErrorKind::StorageFailure,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn project_not_found(name: &str) -> Self {
        Self::NotFound(format!("Project '{}' not found", name))
    }

    /// Whether this error is caused by the caller rather than the storage layer.
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::StorageFailure | ErrorKind::Internal)
    }
}

pub type Result<T> = std::result::Result<T, CursorDbError>;
