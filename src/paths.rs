//! Cursor user-data directory resolution.
//!
//! Cursor keeps its per-workspace and global state under a `User` directory
//! whose location depends on the host OS:
//! - macOS: `~/Library/Application Support/Cursor/User`
//! - Windows: `~/AppData/Roaming/Cursor/User`
//! - Linux: `~/.config/Cursor/User`

use directories::BaseDirs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Name of the per-workspace state directory under the Cursor root.
pub const WORKSPACE_STORAGE_DIR: &str = "workspaceStorage";
/// Name of the global state directory under the Cursor root.
pub const GLOBAL_STORAGE_DIR: &str = "globalStorage";
/// SQLite database file written by Cursor in every storage directory.
pub const STATE_DB_FILE: &str = "state.vscdb";
/// Workspace descriptor naming the folder a workspace was opened on.
pub const WORKSPACE_DESCRIPTOR_FILE: &str = "workspace.json";

/// Current user's home directory, if one can be determined.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Default Cursor `User` directory for the given OS identifier
/// (as reported by `std::env::consts::OS`).
pub fn default_cursor_path_for(os: &str, home: &Path) -> Option<PathBuf> {
    let relative = match os {
        "macos" => "Library/Application Support/Cursor/User",
        "windows" => "AppData/Roaming/Cursor/User",
        "linux" => ".config/Cursor/User",
        _ => return None,
    };
    Some(home.join(relative))
}

/// Default Cursor `User` directory for the running host.
///
/// Returns `None` (with a warning) on unrecognised platforms or when the home
/// directory cannot be determined.
pub fn default_cursor_path() -> Option<PathBuf> {
    let os = std::env::consts::OS;
    let Some(home) = home_dir() else {
        warn!("Could not determine home directory; no default Cursor path");
        return None;
    };

    match default_cursor_path_for(os, &home) {
        Some(path) => {
            info!("Detected default Cursor path for {}: {}", os, path.display());
            Some(path)
        }
        None => {
            warn!(
                "Unknown operating system: {}. Cannot determine default Cursor path.",
                os
            );
            None
        }
    }
}

/// Expand a leading `~` against `home`.
///
/// Only the bare `~` and `~/...` (or `~\...`) forms are expanded; `~user`
/// is left untouched.
pub fn expand_home_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };

    if text == "~" {
        home.to_path_buf()
    } else if let Some(rest) = text
        .strip_prefix("~/")
        .or_else(|| text.strip_prefix("~\\"))
    {
        home.join(rest)
    } else {
        path.to_path_buf()
    }
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem. `..` never climbs above the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    out
}

/// Expand `~`, make the path absolute relative to the current directory and
/// normalise `.` and `..`.
///
/// No existence check is made; missing directories are reported later by
/// discovery.
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = expand_home_with(path, home_dir().as_deref());
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    normalize_lexically(&absolute)
}

/// Resolve the Cursor root: an explicit override if given, else the default.
pub fn resolve_cursor_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(resolve_path(path)),
        None => default_cursor_path(),
    }
}
