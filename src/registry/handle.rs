//! Shared, atomically refreshed registry.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

use super::snapshot::RegistrySnapshot;
use crate::metrics;
use crate::paths::resolve_path;

/// Owner of the current [`RegistrySnapshot`].
///
/// Readers clone the current `Arc` and work against that snapshot for the
/// whole request. `refresh` builds a new snapshot off to the side and
/// publishes it with a single pointer swap, so a reader never observes a
/// partially rebuilt registry.
#[derive(Debug)]
pub struct RegistryHandle {
    cursor_path: Option<PathBuf>,
    /// Explicit project directories. Also serialises concurrent refreshes.
    project_dirs: Mutex<Vec<PathBuf>>,
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl RegistryHandle {
    /// Create a handle and run the initial discovery pass.
    pub fn new(cursor_path: Option<PathBuf>, project_dirs: Vec<PathBuf>) -> Self {
        let mut resolved: Vec<PathBuf> = Vec::with_capacity(project_dirs.len());
        for dir in project_dirs.iter().map(|d| resolve_path(d)) {
            if !resolved.contains(&dir) {
                resolved.push(dir);
            }
        }

        let handle = Self {
            cursor_path,
            project_dirs: Mutex::new(resolved),
            current: RwLock::new(Arc::new(RegistrySnapshot::default())),
        };
        handle.refresh();
        handle
    }

    /// The Cursor root this registry scans, if any.
    pub fn cursor_path(&self) -> Option<&Path> {
        self.cursor_path.as_deref()
    }

    /// Explicitly registered project directories.
    pub fn project_dirs(&self) -> Vec<PathBuf> {
        self.project_dirs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Rebuild the registry from disk and publish it.
    pub fn refresh(&self) -> Arc<RegistrySnapshot> {
        let dirs = self.project_dirs.lock().unwrap_or_else(|e| e.into_inner());
        self.rebuild(&dirs)
    }

    /// Register an extra project directory and refresh.
    ///
    /// Returns the number of projects after the refresh.
    pub fn add_project_dir(&self, dir: &Path) -> usize {
        let dir = resolve_path(dir);
        let mut dirs = self.project_dirs.lock().unwrap_or_else(|e| e.into_inner());

        if dirs.contains(&dir) {
            return self.snapshot().project_count();
        }

        info!("Adding project directory {}", dir.display());
        dirs.push(dir);
        self.rebuild(&dirs).project_count()
    }

    fn rebuild(&self, dirs: &[PathBuf]) -> Arc<RegistrySnapshot> {
        let snapshot = Arc::new(RegistrySnapshot::build(self.cursor_path.as_deref(), dirs));

        metrics::REGISTRY_REFRESHES.inc();
        metrics::REGISTERED_PROJECTS.set(snapshot.project_count() as f64);
        info!(
            projects = snapshot.project_count(),
            skipped = snapshot.skipped().len(),
            "Registry refreshed"
        );

        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::clone(&snapshot);
        snapshot
    }
}
