//! Project discovery over Cursor's `workspaceStorage` directory.
//!
//! Every workspace Cursor has opened gets a hashed subdirectory under
//! `workspaceStorage/` holding a `workspace.json` descriptor and a
//! `state.vscdb` database. Discovery pairs them up and derives a project
//! name from the descriptor's `folder` URI.
//!
//! Problems with individual workspaces never abort the scan: they are logged
//! and collected in [`Discovery::skipped`].

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::paths::{STATE_DB_FILE, WORKSPACE_DESCRIPTOR_FILE, WORKSPACE_STORAGE_DIR};
use crate::registry::{project_name_from_uri, ProjectInfo};

/// Reasons a workspace directory was skipped.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("failed to read workspace descriptor: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse workspace descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("workspace descriptor has no folder URI")]
    MissingFolder,

    #[error("cannot derive a project name from folder URI '{0}'")]
    UnnamedFolder(String),
}

/// A workspace directory that looked like a project but could not be used.
#[derive(Debug, Clone)]
pub struct SkippedWorkspace {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a discovery pass.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Projects in directory-enumeration order
    pub projects: Vec<ProjectInfo>,
    pub skipped: Vec<SkippedWorkspace>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Scan `root/workspaceStorage` for projects.
///
/// A missing root or storage directory yields an empty result.
pub fn discover(root: Option<&Path>) -> Discovery {
    let Some(root) = root else {
        error!("No Cursor path available");
        return Discovery::default();
    };

    if !root.exists() {
        error!("Cursor path does not exist: {}", root.display());
        return Discovery::default();
    }

    let workspace_storage = root.join(WORKSPACE_STORAGE_DIR);
    let entries = match std::fs::read_dir(&workspace_storage) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Workspace storage directory not readable: {}: {}",
                workspace_storage.display(),
                e
            );
            return Discovery::default();
        }
    };

    info!(
        "Found workspace storage directory: {}",
        workspace_storage.display()
    );

    entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .fold(Discovery::default(), |mut acc, workspace_dir| {
            match read_workspace(&workspace_dir) {
                Ok(Some(project)) => {
                    info!(
                        "Found project: {} at {}",
                        project.name,
                        project.db_path.display()
                    );
                    acc.projects.push(project);
                }
                Ok(None) => {
                    debug!("Not a project workspace: {}", workspace_dir.display());
                }
                Err(e) => {
                    error!(
                        "Error processing workspace: {}: {}",
                        workspace_dir.display(),
                        e
                    );
                    acc.skipped.push(SkippedWorkspace {
                        path: workspace_dir,
                        reason: e.to_string(),
                    });
                }
            }
            acc
        })
}

/// Inspect one `workspaceStorage` subdirectory.
///
/// Returns `Ok(None)` when the directory lacks a descriptor or database and
/// is therefore not a candidate at all.
pub fn read_workspace(workspace_dir: &Path) -> Result<Option<ProjectInfo>, WorkspaceError> {
    let descriptor = workspace_dir.join(WORKSPACE_DESCRIPTOR_FILE);
    let db_path = workspace_dir.join(STATE_DB_FILE);

    if !descriptor.exists() || !db_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&descriptor)?;
    let parsed: Value = serde_json::from_str(&content)?;

    let folder_uri = parsed
        .get("folder")
        .and_then(Value::as_str)
        .filter(|uri| !uri.is_empty())
        .ok_or(WorkspaceError::MissingFolder)?;

    let name = project_name_from_uri(folder_uri)
        .ok_or_else(|| WorkspaceError::UnnamedFolder(folder_uri.to_string()))?;

    Ok(Some(ProjectInfo::from_workspace(
        name,
        db_path,
        workspace_dir.to_path_buf(),
        folder_uri.to_string(),
    )))
}
