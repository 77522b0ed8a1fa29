//! HTTP request handlers for the Cursor DB API.
//!
//! Every handler answers with JSON. Failures are reported as
//! `{"error": message}` with status 400 for client errors and 500 for
//! storage failures; "no data" lookups answer 200 with the same shape.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use super::state::AppState;
use crate::error::CursorDbError;
use crate::metrics;

/// Error response wrapper for [`CursorDbError`].
#[derive(Debug)]
pub struct ApiError(pub CursorDbError);

impl From<CursorDbError> for ApiError {
    fn from(err: CursorDbError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!(error = %self.0, "Request rejected");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Query string of `GET /projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectsParams {
    pub detailed: Option<String>,
}

impl ProjectsParams {
    /// Only a case-insensitive `true` enables detailed output.
    pub fn is_detailed(&self) -> bool {
        self.detailed
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Query string of `GET /projects/{project}/tables/{table}`.
///
/// `limit` is kept as text so a malformed value gets a JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct TableParams {
    pub query_type: Option<String>,
    pub key: Option<String>,
    pub limit: Option<String>,
}

impl TableParams {
    pub fn parsed_limit(&self) -> Result<Option<usize>, CursorDbError> {
        match self.limit.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.trim().parse::<usize>().map(Some).map_err(|_| {
                CursorDbError::InvalidRequest(format!(
                    "Invalid limit '{}': expected a non-negative integer",
                    raw
                ))
            }),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub projects: usize,
    pub global_storage: bool,
    pub refreshed_at: DateTime<Utc>,
}

/// GET /projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsParams>,
) -> impl IntoResponse {
    Json(state.db.list_projects(params.is_detailed()))
}

/// GET /projects/{project}/chat
pub async fn chat_data(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ApiResult<serde_json::Value> {
    let lookup = state.db.blocking(move |db| db.chat_data(&project)).await?;
    Ok(Json(to_value(&lookup)?))
}

/// GET /projects/{project}/composers
pub async fn composer_index(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ApiResult<serde_json::Value> {
    let lookup = state
        .db
        .blocking(move |db| db.composer_index(&project))
        .await?;
    Ok(Json(to_value(&lookup)?))
}

/// GET /composers/{composer_id}
pub async fn composer_session(
    State(state): State<AppState>,
    Path(composer_id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let lookup = state
        .db
        .blocking(move |db| db.composer_session(&composer_id))
        .await?;
    Ok(Json(to_value(&lookup)?))
}

/// GET /projects/{project}/tables/{table}
pub async fn query_table(
    State(state): State<AppState>,
    Path((project, table)): Path<(String, String)>,
    Query(params): Query<TableParams>,
) -> ApiResult<serde_json::Value> {
    let limit = params.parsed_limit()?;
    let query_type = params.query_type.unwrap_or_else(|| "get_all".to_string());

    info!(
        project = %project,
        table = %table,
        query_type = %query_type,
        "Processing table query"
    );

    let key = params.key;
    let rows = state
        .db
        .blocking(move |db| db.query_named(&project, &table, &query_type, key.as_deref(), limit))
        .await?;
    Ok(Json(to_value(&rows)?))
}

/// GET|POST /refresh
pub async fn refresh(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    let summary = state.db.blocking(|db| Ok(db.refresh())).await?;
    Ok(Json(to_value(&summary)?))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.db.snapshot();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        projects: snapshot.project_count(),
        global_storage: snapshot.global_db_path().is_some(),
        refreshed_at: snapshot.refreshed_at(),
    })
}

/// Prometheus metrics endpoint.
///
/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    let output = metrics::gather_metrics();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], output)
}

fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError(CursorDbError::Internal(e.to_string())))
}
