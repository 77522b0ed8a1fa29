//! Bounded read-only queries against a single `state.vscdb`.

use rusqlite::{params, Connection, OpenFlags, Params, Statement};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error};

use super::value::{key_text, QueryRow, StoredValue};
use super::{QueryMode, Table};
use crate::error::{CursorDbError, Result};
use crate::metrics;

/// Default row limit for `get_all` and `search_keys`.
pub const DEFAULT_LIMIT: usize = 100;

fn open_read_only(db_path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn collect_rows<P: Params>(stmt: &mut Statement<'_>, params: P) -> rusqlite::Result<Vec<QueryRow>> {
    stmt.query_map(params, |row| {
        Ok(QueryRow {
            key: key_text(row.get_ref(0)?),
            value: StoredValue::from_sql(row.get_ref(1)?),
        })
    })?
    .collect()
}

fn required_key(mode: QueryMode, key: Option<&str>) -> Result<&str> {
    match key {
        Some(k) if !k.is_empty() => Ok(k),
        _ => Err(CursorDbError::InvalidRequest(format!(
            "Query type '{}' requires a key parameter",
            mode
        ))),
    }
}

/// Run one query against the database at `db_path`.
///
/// `get_all` and `search_keys` return at most `limit` rows in store order;
/// `get_by_key` returns zero or one row. `search_keys` is a case-sensitive
/// substring match on the key.
pub fn execute_query(
    db_path: &Path,
    table: Table,
    mode: QueryMode,
    key: Option<&str>,
    limit: usize,
) -> Result<Vec<QueryRow>> {
    let key = if mode.requires_key() {
        Some(required_key(mode, key)?)
    } else {
        None
    };
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    metrics::QUERIES_TOTAL.inc();
    let start = Instant::now();

    let result = run_query(db_path, table, mode, key, limit);

    metrics::QUERY_LATENCY.observe(start.elapsed().as_secs_f64());
    match &result {
        Ok(rows) => {
            metrics::QUERY_ROWS.observe(rows.len() as f64);
            debug!(
                db = %db_path.display(),
                table = %table,
                mode = %mode,
                rows = rows.len(),
                "Query completed"
            );
        }
        Err(e) => {
            metrics::QUERY_ERRORS.inc();
            error!(db = %db_path.display(), error = %e, "SQLite error");
        }
    }

    Ok(result?)
}

fn run_query(
    db_path: &Path,
    table: Table,
    mode: QueryMode,
    key: Option<&str>,
    limit: i64,
) -> rusqlite::Result<Vec<QueryRow>> {
    let conn = open_read_only(db_path)?;

    let rows = {
        let (sql, rows) = match (mode, key) {
            (QueryMode::GetByKey, Some(key)) => {
                let sql = format!("SELECT key, value FROM {} WHERE key = ?1", table);
                let mut stmt = conn.prepare(&sql)?;
                (sql, collect_rows(&mut stmt, params![key])?)
            }
            (QueryMode::SearchKeys, Some(key)) => {
                let sql = format!(
                    "SELECT key, value FROM {} WHERE instr(key, ?1) > 0 LIMIT ?2",
                    table
                );
                let mut stmt = conn.prepare(&sql)?;
                (sql, collect_rows(&mut stmt, params![key, limit])?)
            }
            _ => {
                let sql = format!("SELECT key, value FROM {} LIMIT ?1", table);
                let mut stmt = conn.prepare(&sql)?;
                (sql, collect_rows(&mut stmt, params![limit])?)
            }
        };
        debug!(sql = %sql, "Executed statement");
        rows
    };

    conn.close().map_err(|(_, e)| e)?;
    Ok(rows)
}

/// Fetch the value stored under `key`, if any, with one exact-key read.
pub fn lookup_key(db_path: &Path, table: Table, key: &str) -> Result<Option<StoredValue>> {
    let mut rows = execute_query(db_path, table, QueryMode::GetByKey, Some(key), 1)?;
    Ok(if rows.is_empty() {
        None
    } else {
        Some(rows.swap_remove(0).value)
    })
}
