//! Route definitions for the HTTP API.

use axum::{routing::get, Router};

use super::handlers;
use super::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/projects", get(handlers::list_projects))
        .route("/projects/{project}/chat", get(handlers::chat_data))
        .route("/projects/{project}/composers", get(handlers::composer_index))
        .route(
            "/projects/{project}/tables/{table}",
            get(handlers::query_table),
        )
        .route("/composers/{composer_id}", get(handlers::composer_session))
        .route("/refresh", get(handlers::refresh).post(handlers::refresh))
        // Health and metrics
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
