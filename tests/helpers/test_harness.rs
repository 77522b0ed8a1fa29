use anyhow::Result;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cursor_db::{CursorDb, RegistryHandle};

use super::test_utils::create_state_db;

/// A throwaway Cursor data directory.
///
/// Layout mirrors a real install: `<tmp>/User/workspaceStorage/<hash>/` and
/// `<tmp>/User/globalStorage/`. Extra project directories live next to
/// `User/` so they are never discovered by the scan.
pub struct CursorFixture {
    pub temp_dir: TempDir,
}

impl CursorFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir_all(temp_dir.path().join("User").join("workspaceStorage"))?;
        Ok(Self { temp_dir })
    }

    /// The Cursor `User` directory.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("User")
    }

    /// Add a workspace opened on `folder_uri` whose `ItemTable` holds `items`.
    pub fn add_workspace(
        &self,
        hash: &str,
        folder_uri: &str,
        items: &[(&str, &str)],
    ) -> Result<PathBuf> {
        let dir = self.root().join("workspaceStorage").join(hash);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(
            dir.join("workspace.json"),
            serde_json::to_string(&json!({ "folder": folder_uri }))?,
        )?;
        create_state_db(&dir.join("state.vscdb"), items, &[])?;
        Ok(dir)
    }

    /// Write a raw `workspace.json` with no database next to it.
    pub fn add_raw_workspace(&self, hash: &str, descriptor: &str, with_db: bool) -> Result<PathBuf> {
        let dir = self.root().join("workspaceStorage").join(hash);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("workspace.json"), descriptor)?;
        if with_db {
            create_state_db(&dir.join("state.vscdb"), &[], &[])?;
        }
        Ok(dir)
    }

    /// Create the global store with the given `cursorDiskKV` rows.
    pub fn add_global_store(&self, disk_kv: &[(&str, &str)]) -> Result<PathBuf> {
        let path = self.root().join("globalStorage").join("state.vscdb");
        create_state_db(&path, &[], disk_kv)?;
        Ok(path)
    }

    /// Create a standalone project directory named `name`.
    pub fn add_project_dir(&self, name: &str, items: &[(&str, &str)]) -> Result<PathBuf> {
        let dir = self.temp_dir.path().join("extra").join(name);
        create_state_db(&dir.join("state.vscdb"), items, &[])?;
        Ok(dir)
    }

    pub fn registry(&self, project_dirs: Vec<PathBuf>) -> RegistryHandle {
        RegistryHandle::new(Some(self.root()), project_dirs)
    }

    pub fn db(&self) -> CursorDb {
        CursorDb::new(self.registry(Vec::new()))
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

pub const CHAT_KEY: &str = "workbench.panel.aichat.view.aichat.chatdata";
pub const COMPOSER_KEY: &str = "composer.composerData";

/// The canonical fixture: project `myapp` with chat data, a composer index
/// referencing `x1`, and a global store holding session `x1`.
pub fn myapp_fixture() -> Result<CursorFixture> {
    let fixture = CursorFixture::new()?;
    fixture.add_workspace(
        "abc123",
        "file:///home/u/code/myapp",
        &[
            (CHAT_KEY, r#"{"msgs":[1,2]}"#),
            (
                COMPOSER_KEY,
                r#"{"allComposers":[{"composerId":"x1"},{"notId":"y"}]}"#,
            ),
            ("workbench.sideBar.visible", "true"),
            ("history.entries", "not json {"),
        ],
    )?;
    fixture.add_global_store(&[("composerData:x1", r#"{"conversation":[{"text":"hi"}]}"#)])?;
    Ok(fixture)
}
