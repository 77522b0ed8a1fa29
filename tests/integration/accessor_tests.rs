use anyhow::Result;
use serde_json::json;

use cursor_db::{ErrorKind, Lookup};

use crate::helpers::test_harness::{myapp_fixture, CursorFixture, CHAT_KEY};

#[test]
fn test_chat_data_is_unwrapped() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let chat = db.chat_data("myapp")?;
    assert_eq!(chat, Lookup::Found(json!({"msgs": [1, 2]})));

    Ok(())
}

#[test]
fn test_chat_data_missing_is_sentinel() -> Result<()> {
    let fixture = CursorFixture::new()?;
    fixture.add_workspace("abc", "file:///home/u/code/quiet", &[])?;
    let db = fixture.db();

    let chat = db.chat_data("quiet")?;
    assert!(!chat.is_found());
    assert_eq!(
        serde_json::to_value(&chat)?,
        json!({"error": "No chat data found for this project"})
    );

    Ok(())
}

#[test]
fn test_raw_chat_data_is_returned_as_string() -> Result<()> {
    let fixture = CursorFixture::new()?;
    fixture.add_workspace("abc", "file:///home/u/code/odd", &[(CHAT_KEY, "plain text")])?;
    let db = fixture.db();

    assert_eq!(db.chat_data("odd")?, Lookup::Found(json!("plain text")));

    Ok(())
}

#[test]
fn test_composer_index() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let index = db.composer_index("myapp")?;
    let index = index.found().expect("composer index present");
    assert_eq!(index.composer_ids, vec!["x1".to_string()]);
    assert_eq!(
        index.full_data,
        json!({"allComposers": [{"composerId": "x1"}, {"notId": "y"}]})
    );

    Ok(())
}

#[test]
fn test_composer_index_missing_is_sentinel() -> Result<()> {
    let fixture = CursorFixture::new()?;
    fixture.add_workspace("abc", "file:///home/u/code/quiet", &[])?;
    let db = fixture.db();

    assert_eq!(
        serde_json::to_value(db.composer_index("quiet")?)?,
        json!({"error": "No composer data found for this project"})
    );

    Ok(())
}

#[test]
fn test_composer_session() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let session = db.composer_session("x1")?;
    let session = session.found().expect("session x1 present");
    assert_eq!(session.composer_id, "x1");
    assert_eq!(session.data, json!({"conversation": [{"text": "hi"}]}));

    let missing = db.composer_session("nope")?;
    assert_eq!(
        serde_json::to_value(&missing)?,
        json!({"error": "No data found for composer ID: nope"})
    );

    Ok(())
}

#[test]
fn test_composer_session_without_global_store() -> Result<()> {
    let fixture = CursorFixture::new()?;
    fixture.add_workspace("abc", "file:///home/u/code/solo", &[])?;
    let db = fixture.db();

    let err = db.composer_session("x1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConfigured);

    Ok(())
}

#[test]
fn test_unknown_project_for_every_accessor() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    assert_eq!(db.chat_data("ghost").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(db.composer_index("ghost").unwrap_err().kind(), ErrorKind::NotFound);

    Ok(())
}

#[test]
fn test_refresh_summary() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let summary = serde_json::to_value(db.refresh())?;
    assert_eq!(summary["message"], "Database paths refreshed");
    assert!(summary["projects"]["myapp"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_blocking_runs_accessors_off_the_runtime() -> Result<()> {
    let fixture = myapp_fixture()?;
    let db = fixture.db();

    let chat = db.blocking(|db| db.chat_data("myapp")).await?;
    assert!(chat.is_found());

    let err = db.blocking(|db| db.chat_data("ghost")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    Ok(())
}
