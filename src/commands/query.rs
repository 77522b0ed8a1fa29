//! One-shot query and accessor commands.
//!
//! Results are printed to stdout as pretty JSON, the same documents the HTTP
//! API and the MCP server return.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::accessors::CursorDb;

/// Run a table query and print the rows.
pub fn run(
    db: &CursorDb,
    project: &str,
    table: &str,
    query_type: &str,
    key: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let rows = db.query_named(project, table, query_type, key, limit)?;
    eprintln!("{} row(s)", rows.len());
    print_json(&rows)
}

/// Print a project's AI chat data.
pub fn chat(db: &CursorDb, project: &str) -> Result<()> {
    print_json(&db.chat_data(project)?)
}

/// Print a project's composer index.
pub fn composers(db: &CursorDb, project: &str) -> Result<()> {
    print_json(&db.composer_index(project)?)
}

/// Print one composer session.
pub fn composer(db: &CursorDb, composer_id: &str) -> Result<()> {
    print_json(&db.composer_session(composer_id)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", output);
    Ok(())
}
