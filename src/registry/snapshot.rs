//! Immutable view of the discovered projects and the global store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::project::{project_name_from_dir, ProjectInfo};
use crate::discovery::{discover, SkippedWorkspace};
use crate::error::{CursorDbError, Result};
use crate::paths::{GLOBAL_STORAGE_DIR, STATE_DB_FILE};

/// One fully built registry. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    projects: HashMap<String, ProjectInfo>,
    global_db_path: Option<PathBuf>,
    skipped: Vec<SkippedWorkspace>,
    refreshed_at: DateTime<Utc>,
}

/// Project listing in the shape the transports return.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProjectListing {
    /// Project name to database path
    Paths(BTreeMap<String, PathBuf>),
    /// Project name to full metadata
    Detailed(BTreeMap<String, ProjectInfo>),
}

impl ProjectListing {
    pub fn len(&self) -> usize {
        match self {
            Self::Paths(map) => map.len(),
            Self::Detailed(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self {
            projects: HashMap::new(),
            global_db_path: None,
            skipped: Vec::new(),
            refreshed_at: Utc::now(),
        }
    }
}

impl RegistrySnapshot {
    /// Build a registry from scratch.
    ///
    /// Projects discovered under `cursor_path` are installed first; entries
    /// for `project_dirs` are added afterwards and replace discovered projects
    /// of the same name.
    pub fn build(cursor_path: Option<&Path>, project_dirs: &[PathBuf]) -> Self {
        let discovery = discover(cursor_path);

        let mut projects: HashMap<String, ProjectInfo> = HashMap::new();
        for project in discovery.projects {
            let workspace = project.display_path();
            if let Some(previous) = projects.insert(project.name.clone(), project) {
                info!(
                    "Workspace {} replaces discovered project '{}' at {}",
                    workspace,
                    previous.name,
                    previous.display_path()
                );
            }
        }

        let global_db_path = cursor_path.and_then(|root| {
            let path = root.join(GLOBAL_STORAGE_DIR).join(STATE_DB_FILE);
            if path.exists() {
                info!("Found global storage database at {}", path.display());
                Some(path)
            } else {
                warn!("Global storage database not found at {}", path.display());
                None
            }
        });

        for dir in project_dirs {
            let db_path = dir.join(STATE_DB_FILE);
            if !db_path.exists() {
                warn!("No {} found in {}", STATE_DB_FILE, dir.display());
                continue;
            }
            let Some(name) = project_name_from_dir(dir) else {
                warn!("Cannot derive a project name from {}", dir.display());
                continue;
            };
            if projects.contains_key(&name) {
                info!("Project directory {} replaces discovered project '{}'", dir.display(), name);
            }
            info!("Found database: {} at {}", name, db_path.display());
            projects.insert(name.clone(), ProjectInfo::from_directory(name, db_path));
        }

        Self {
            projects,
            global_db_path,
            skipped: discovery.skipped,
            refreshed_at: Utc::now(),
        }
    }

    pub fn project(&self, name: &str) -> Option<&ProjectInfo> {
        self.projects.get(name)
    }

    /// Database path of a registered project.
    pub fn db_path(&self, name: &str) -> Result<&Path> {
        self.projects
            .get(name)
            .map(|p| p.db_path.as_path())
            .ok_or_else(|| CursorDbError::project_not_found(name))
    }

    pub fn projects(&self) -> &HashMap<String, ProjectInfo> {
        &self.projects
    }

    pub fn global_db_path(&self) -> Option<&Path> {
        self.global_db_path.as_deref()
    }

    pub fn skipped(&self) -> &[SkippedWorkspace] {
        &self.skipped
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Registered project names, sorted.
    pub fn project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.projects.keys().cloned().collect();
        names.sort();
        names
    }

    /// List projects as name to path, or name to metadata when `detailed`.
    pub fn list_projects(&self, detailed: bool) -> ProjectListing {
        if detailed {
            ProjectListing::Detailed(
                self.projects
                    .iter()
                    .map(|(name, info)| (name.clone(), info.clone()))
                    .collect(),
            )
        } else {
            ProjectListing::Paths(
                self.projects
                    .iter()
                    .map(|(name, info)| (name.clone(), info.db_path.clone()))
                    .collect(),
            )
        }
    }
}
