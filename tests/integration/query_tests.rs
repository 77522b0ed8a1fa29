use anyhow::Result;
use serde_json::json;

use cursor_db::{ErrorKind, QueryMode, StoredValue, Table};

use crate::helpers::test_harness::{myapp_fixture, CHAT_KEY};
use crate::helpers::test_utils::{execute_sql, insert_blob, insert_numbered_items};

#[test]
fn test_get_by_key_returns_at_most_one_row() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let rows = db.query("myapp", Table::ItemTable, QueryMode::GetByKey, Some(CHAT_KEY), None)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, CHAT_KEY);
    assert_eq!(rows[0].value, StoredValue::Structured(json!({"msgs": [1, 2]})));

    let rows = db.query(
        "myapp",
        Table::ItemTable,
        QueryMode::GetByKey,
        Some("no.such.key"),
        None,
    )?;
    assert!(rows.is_empty());

    Ok(())
}

#[test]
fn test_get_all_respects_limit() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db_path = fixture.root().join("workspaceStorage/abc123/state.vscdb");
    insert_numbered_items(&db_path, "bulk.", 150)?;
    let db = fixture.db();

    let rows = db.query("myapp", Table::ItemTable, QueryMode::GetAll, None, None)?;
    assert_eq!(rows.len(), 100);

    let rows = db.query("myapp", Table::ItemTable, QueryMode::GetAll, None, Some(7))?;
    assert_eq!(rows.len(), 7);

    let rows = db.query("myapp", Table::ItemTable, QueryMode::GetAll, None, Some(0))?;
    assert!(rows.is_empty());

    Ok(())
}

#[test]
fn test_search_keys_matches_substring() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db_path = fixture.root().join("workspaceStorage/abc123/state.vscdb");
    insert_numbered_items(&db_path, "panel.item.", 20)?;
    let db = fixture.db();

    let rows = db.query(
        "myapp",
        Table::ItemTable,
        QueryMode::SearchKeys,
        Some("panel"),
        Some(10),
    )?;
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|row| row.key.contains("panel")));

    // Case-sensitive
    let rows = db.query(
        "myapp",
        Table::ItemTable,
        QueryMode::SearchKeys,
        Some("PANEL"),
        None,
    )?;
    assert!(rows.is_empty());

    Ok(())
}

#[test]
fn test_search_keys_treats_wildcards_literally() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db_path = fixture.root().join("workspaceStorage/abc123/state.vscdb");
    insert_numbered_items(&db_path, "pct%", 2)?;
    let db = fixture.db();

    let rows = db.query("myapp", Table::ItemTable, QueryMode::SearchKeys, Some("%"), None)?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.key.starts_with("pct%")));

    let rows = db.query("myapp", Table::ItemTable, QueryMode::SearchKeys, Some("_"), None)?;
    assert!(rows.is_empty());

    Ok(())
}

#[test]
fn test_malformed_json_is_returned_raw() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let rows = db.query(
        "myapp",
        Table::ItemTable,
        QueryMode::GetByKey,
        Some("history.entries"),
        None,
    )?;
    assert_eq!(rows[0].value, StoredValue::Raw("not json {".to_string()));
    assert_eq!(serde_json::to_value(&rows[0])?, json!({"key": "history.entries", "value": "not json {"}));

    Ok(())
}

#[test]
fn test_null_and_blob_keys_do_not_fail_the_query() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db_path = fixture.root().join("workspaceStorage/abc123/state.vscdb");
    execute_sql(
        &db_path,
        r#"INSERT INTO ItemTable (key, value) VALUES (NULL, '{"a":1}');
           INSERT INTO ItemTable (key, value) VALUES (X'6b6579', '1');"#,
    )?;
    let db = fixture.db();

    let rows = db.query("myapp", Table::ItemTable, QueryMode::GetAll, None, None)?;
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().any(|r| r.key == CHAT_KEY));

    let null_key = rows.iter().find(|r| r.key.is_empty()).expect("NULL key row");
    assert_eq!(null_key.value, StoredValue::Structured(json!({"a": 1})));

    let blob_key = rows.iter().find(|r| r.key == "key").expect("BLOB key row");
    assert_eq!(blob_key.value, StoredValue::Structured(json!(1)));

    Ok(())
}

#[test]
fn test_blob_values_are_decoded() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db_path = fixture.root().join("workspaceStorage/abc123/state.vscdb");
    insert_blob(&db_path, "blob.json", br#"{"a": true}"#)?;
    insert_blob(&db_path, "blob.bytes", &[0x66, 0x6f, 0xff])?;
    let db = fixture.db();

    let rows = db.query("myapp", Table::ItemTable, QueryMode::SearchKeys, Some("blob."), None)?;
    assert_eq!(rows.len(), 2);

    let json_row = rows.iter().find(|r| r.key == "blob.json").expect("blob.json row");
    assert_eq!(json_row.value, StoredValue::Structured(json!({"a": true})));

    let bytes_row = rows.iter().find(|r| r.key == "blob.bytes").expect("blob.bytes row");
    assert!(!bytes_row.value.is_structured());

    Ok(())
}

#[test]
fn test_query_errors() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let err = db.query_named("ghost", "ItemTable", "get_all", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = db.query_named("myapp", "Users", "get_all", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    let err = db.query_named("myapp", "ItemTable", "drop_all", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    for mode in ["get_by_key", "search_keys"] {
        let err = db.query_named("myapp", "ItemTable", mode, None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        let err = db.query_named("myapp", "ItemTable", mode, Some(""), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    Ok(())
}

#[test]
fn test_cursor_disk_kv_table() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let rows = db.query_named("myapp", "cursorDiskKV", "get_all", None, None)?;
    assert!(rows.is_empty());

    Ok(())
}

#[test]
fn test_corrupt_database_is_storage_failure() -> Result<()> {
    let fixture = myapp_fixture()?;
    let extra = fixture.path().join("extra").join("corrupt");
    std::fs::create_dir_all(&extra)?;
    std::fs::write(extra.join("state.vscdb"), b"definitely not sqlite, just some bytes here")?;

    let db = fixture.db();
    db.add_project_dir(&extra);

    let err = db.query_named("corrupt", "ItemTable", "get_all", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert!(!err.is_client_error());

    Ok(())
}
