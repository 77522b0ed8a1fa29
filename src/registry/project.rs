//! Project metadata discovered from Cursor's storage directories.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata about a registered project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name (last segment of the folder URI, or the directory name
    /// for explicitly added directories)
    pub name: String,
    /// Path to the project's `state.vscdb`
    pub db_path: PathBuf,
    /// The `workspaceStorage` subdirectory this project was found in
    pub workspace_dir: Option<PathBuf>,
    /// Folder URI recorded in `workspace.json`
    pub folder_uri: Option<String>,
}

impl ProjectInfo {
    /// Create a project found under `workspaceStorage`.
    pub fn from_workspace(
        name: String,
        db_path: PathBuf,
        workspace_dir: PathBuf,
        folder_uri: String,
    ) -> Self {
        Self {
            name,
            db_path,
            workspace_dir: Some(workspace_dir),
            folder_uri: Some(folder_uri),
        }
    }

    /// Create a project from an explicitly configured directory.
    pub fn from_directory(name: String, db_path: PathBuf) -> Self {
        Self {
            name,
            db_path,
            workspace_dir: None,
            folder_uri: None,
        }
    }

    /// Get a display-friendly representation of the database path.
    pub fn display_path(&self) -> String {
        self.db_path.display().to_string()
    }
}

/// Derive a project name from a folder URI.
///
/// `file:///Users/me/code/myapp/` yields `myapp`. Returns `None` when the
/// URI has no non-empty final segment.
pub fn project_name_from_uri(uri: &str) -> Option<String> {
    let trimmed = uri.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Derive a project name from a directory path (its last component).
pub fn project_name_from_dir(dir: &Path) -> Option<String> {
    dir.file_name().map(|n| n.to_string_lossy().to_string())
}
