use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// Create a `state.vscdb` with both key-value tables and the given rows.
pub fn create_state_db(
    path: &Path,
    items: &[(&str, &str)],
    disk_kv: &[(&str, &str)],
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);
         CREATE TABLE IF NOT EXISTS cursorDiskKV (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);",
    )?;

    for (key, value) in items {
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }
    for (key, value) in disk_kv {
        conn.execute(
            "INSERT INTO cursorDiskKV (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    }

    Ok(())
}

/// Insert `count` rows `prefix0..prefixN` into `ItemTable`.
pub fn insert_numbered_items(path: &Path, prefix: &str, count: usize) -> Result<()> {
    let conn = Connection::open(path)?;
    for i in 0..count {
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
            params![format!("{}{}", prefix, i), format!("{{\"n\": {}}}", i)],
        )?;
    }
    Ok(())
}

/// Store a raw blob value under `key` in `ItemTable`.
pub fn insert_blob(path: &Path, key: &str, value: &[u8]) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute(
        "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// Run raw SQL against a fixture database.
pub fn execute_sql(path: &Path, sql: &str) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(sql)?;
    Ok(())
}
