use anyhow::Result;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cursor_db::web::{AppState, WebServer};

use crate::helpers::test_harness::{myapp_fixture, CursorFixture};

fn router(fixture: &CursorFixture) -> Router {
    WebServer::new(AppState::new(fixture.db())).router()
}

async fn send(app: Router, method: Method, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri).body(Body::empty())?;
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

async fn get(app: Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, Method::GET, uri).await
}

#[tokio::test]
async fn test_list_projects() -> Result<()> {
    let fixture = myapp_fixture()?;
    let app = router(&fixture);

    let (status, body) = get(app.clone(), "/projects").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["myapp"].as_str().unwrap().ends_with("state.vscdb"));

    let (status, body) = get(app, "/projects?detailed=true").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["myapp"]["folder_uri"], "file:///home/u/code/myapp");

    Ok(())
}

#[tokio::test]
async fn test_chat_endpoint() -> Result<()> {
    let fixture = myapp_fixture()?;

    let (status, body) = get(router(&fixture), "/projects/myapp/chat").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msgs": [1, 2]}));

    Ok(())
}

#[tokio::test]
async fn test_composers_endpoints() -> Result<()> {
    let fixture = myapp_fixture()?;
    let app = router(&fixture);

    let (status, body) = get(app.clone(), "/projects/myapp/composers").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["composer_ids"], json!(["x1"]));

    let (status, body) = get(app.clone(), "/composers/x1").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["composer_id"], "x1");
    assert_eq!(body["data"], json!({"conversation": [{"text": "hi"}]}));

    let (status, body) = get(app, "/composers/unknown").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "No data found for composer ID: unknown"}));

    Ok(())
}

#[tokio::test]
async fn test_table_endpoint() -> Result<()> {
    let fixture = myapp_fixture()?;
    let app = router(&fixture);

    let (status, body) = get(
        app.clone(),
        "/projects/myapp/tables/ItemTable?query_type=get_by_key&key=history.entries",
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"key": "history.entries", "value": "not json {"}]));

    let (status, body) = get(
        app.clone(),
        "/projects/myapp/tables/ItemTable?query_type=search_keys&key=workbench&limit=1",
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = get(app, "/projects/myapp/tables/ItemTable").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(4));

    Ok(())
}

#[tokio::test]
async fn test_client_errors() -> Result<()> {
    let fixture = myapp_fixture()?;
    let app = router(&fixture);

    for uri in [
        "/projects/ghost/chat",
        "/projects/ghost/composers",
        "/projects/ghost/tables/ItemTable",
        "/projects/myapp/tables/Users",
        "/projects/myapp/tables/ItemTable?query_type=get_by_key",
        "/projects/myapp/tables/ItemTable?query_type=explode",
        "/projects/myapp/tables/ItemTable?limit=abc",
    ] {
        let (status, body) = get(app.clone(), uri).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }

    let (_, body) = get(app, "/projects/ghost/chat").await?;
    assert_eq!(body["error"], "Project 'ghost' not found");

    Ok(())
}

#[tokio::test]
async fn test_storage_failure_is_server_error() -> Result<()> {
    let fixture = myapp_fixture()?;
    let extra = fixture.path().join("extra").join("corrupt");
    std::fs::create_dir_all(&extra)?;
    std::fs::write(extra.join("state.vscdb"), b"definitely not sqlite, just some bytes here")?;

    let db = fixture.db();
    db.add_project_dir(&extra);
    let app = WebServer::new(AppState::new(db)).router();

    let (status, body) = get(app.clone(), "/projects/corrupt/tables/ItemTable").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Database error"));

    let (status, body) = get(app, "/projects/corrupt/chat").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_composer_without_global_store() -> Result<()> {
    let fixture = CursorFixture::new()?;
    fixture.add_workspace("abc", "file:///home/u/code/solo", &[])?;

    let (status, body) = get(router(&fixture), "/composers/x1").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Global storage database not found");

    Ok(())
}

#[tokio::test]
async fn test_refresh_endpoint() -> Result<()> {
    let fixture = myapp_fixture()?;
    let app = router(&fixture);

    fixture.add_workspace("def456", "file:///home/u/code/later", &[])?;

    let (status, body) = send(app.clone(), Method::POST, "/refresh").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Database paths refreshed");
    assert!(body["projects"]["later"].is_string());

    let (status, body) = get(app, "/refresh").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["projects"]["myapp"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let fixture = myapp_fixture()?;

    let (status, body) = get(router(&fixture), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["projects"], 1);
    assert_eq!(body["global_storage"], true);
    assert!(body["refreshed_at"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint() -> Result<()> {
    cursor_db::metrics::register_metrics();
    let fixture = myapp_fixture()?;
    let app = router(&fixture);

    get(app.clone(), "/projects/myapp/chat").await?;

    let request = Request::builder().uri("/metrics").body(Body::empty())?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let text = String::from_utf8(bytes.to_vec())?;
    assert!(text.contains("cursor_db_queries_total"));

    Ok(())
}
