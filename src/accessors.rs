//! Domain read paths over the registry and the query engine.
//!
//! [`CursorDb`] is the single entry point the transports use. Lookups that
//! find no data return a [`Lookup::Missing`] sentinel (`{"error": ...}`)
//! rather than an error; unknown projects and bad queries are errors.

use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CursorDbError, Result};
use crate::registry::{ProjectListing, RegistryHandle, RegistrySnapshot};
use crate::store::{execute_query, lookup_key, QueryMode, QueryRow, Table, DEFAULT_LIMIT};

/// `ItemTable` key holding a project's AI chat panel state.
pub const CHAT_DATA_KEY: &str = "workbench.panel.aichat.view.aichat.chatdata";
/// `ItemTable` key holding a project's composer index.
pub const COMPOSER_INDEX_KEY: &str = "composer.composerData";
/// Prefix of per-session keys in the global `cursorDiskKV` table.
pub const COMPOSER_DATA_PREFIX: &str = "composerData:";

/// Explanatory result for lookups that found nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Missing {
    pub error: String,
}

/// Outcome of a domain lookup. Serialises as the found value itself, or as
/// `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Missing(Missing),
}

impl<T> Lookup<T> {
    fn missing(message: impl Into<String>) -> Self {
        Self::Missing(Missing {
            error: message.into(),
        })
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Composer sessions referenced by a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposerIndex {
    pub composer_ids: Vec<String>,
    pub full_data: Value,
}

impl ComposerIndex {
    /// Collect the `composerId` of every `allComposers` entry that has one.
    pub fn from_value(full_data: Value) -> Self {
        let composer_ids = full_data
            .get("allComposers")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("composerId"))
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            composer_ids,
            full_data,
        }
    }
}

/// A composer session read from the global store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposerSession {
    pub composer_id: String,
    pub data: Value,
}

/// Response of a registry refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub message: String,
    pub projects: ProjectListing,
}

/// Query and accessor service over a shared registry.
#[derive(Debug, Clone)]
pub struct CursorDb {
    registry: Arc<RegistryHandle>,
    default_limit: usize,
}

impl CursorDb {
    pub fn new(registry: RegistryHandle) -> Self {
        Self::with_default_limit(registry, DEFAULT_LIMIT)
    }

    pub fn with_default_limit(registry: RegistryHandle, default_limit: usize) -> Self {
        Self {
            registry: Arc::new(registry),
            default_limit,
        }
    }

    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.registry.snapshot()
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn list_projects(&self, detailed: bool) -> ProjectListing {
        self.snapshot().list_projects(detailed)
    }

    /// Rebuild the registry from disk.
    pub fn refresh(&self) -> RefreshSummary {
        let snapshot = self.registry.refresh();
        RefreshSummary {
            message: "Database paths refreshed".to_string(),
            projects: snapshot.list_projects(false),
        }
    }

    /// Register an extra project directory; returns the new project count.
    pub fn add_project_dir(&self, dir: &Path) -> usize {
        self.registry.add_project_dir(dir)
    }

    /// Run a query against a project's database.
    pub fn query(
        &self,
        project: &str,
        table: Table,
        mode: QueryMode,
        key: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<QueryRow>> {
        let snapshot = self.snapshot();
        let db_path = snapshot.db_path(project)?;
        execute_query(
            db_path,
            table,
            mode,
            key,
            limit.unwrap_or(self.default_limit),
        )
    }

    /// Like [`CursorDb::query`] with table and mode given by name.
    ///
    /// The project is checked before the table and mode names.
    pub fn query_named(
        &self,
        project: &str,
        table_name: &str,
        query_type: &str,
        key: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<QueryRow>> {
        self.snapshot().db_path(project)?;
        let table: Table = table_name.parse()?;
        let mode: QueryMode = query_type.parse()?;
        self.query(project, table, mode, key, limit)
    }

    /// AI chat panel data of a project.
    pub fn chat_data(&self, project: &str) -> Result<Lookup<Value>> {
        let rows = self.query(
            project,
            Table::ItemTable,
            QueryMode::GetByKey,
            Some(CHAT_DATA_KEY),
            None,
        )?;

        Ok(match rows.into_iter().next() {
            Some(row) => Lookup::Found(row.value.into_json()),
            None => Lookup::missing("No chat data found for this project"),
        })
    }

    /// Composer index of a project.
    pub fn composer_index(&self, project: &str) -> Result<Lookup<ComposerIndex>> {
        let rows = self.query(
            project,
            Table::ItemTable,
            QueryMode::GetByKey,
            Some(COMPOSER_INDEX_KEY),
            None,
        )?;

        Ok(match rows.into_iter().next() {
            Some(row) => Lookup::Found(ComposerIndex::from_value(row.value.into_json())),
            None => Lookup::missing("No composer data found for this project"),
        })
    }

    /// One composer session from the global store.
    pub fn composer_session(&self, composer_id: &str) -> Result<Lookup<ComposerSession>> {
        let snapshot = self.snapshot();
        let global_db = snapshot.global_db_path().ok_or_else(|| {
            CursorDbError::NotConfigured("Global storage database not found".to_string())
        })?;

        let key = format!("{}{}", COMPOSER_DATA_PREFIX, composer_id);
        Ok(match lookup_key(global_db, Table::CursorDiskKv, &key)? {
            Some(value) => Lookup::Found(ComposerSession {
                composer_id: composer_id.to_string(),
                data: value.into_json(),
            }),
            None => Lookup::missing(format!("No data found for composer ID: {}", composer_id)),
        })
    }

    /// Run a blocking operation on the blocking thread pool.
    pub async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CursorDb) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| CursorDbError::Internal(e.to_string()))?
    }
}
