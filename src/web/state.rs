//! Application state for the HTTP API.

use crate::accessors::CursorDb;

/// Shared application state for the HTTP API.
///
/// Cloned into every handler; the registry behind [`CursorDb`] is shared.
#[derive(Clone)]
pub struct AppState {
    pub db: CursorDb,
}

impl AppState {
    pub fn new(db: CursorDb) -> Self {
        Self { db }
    }
}
