pub mod health;
pub mod project;
pub mod task;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                          service and store health
///
/// /projects                        list, create
/// /projects/search/{query}         name/description search
/// /projects/{id}                   get, update, delete (cascade)
/// /projects/{id}/stats             task counts and progress
/// /projects/{id}/tasks             summaries of tasks a delete would remove
///
/// /tasks                           list, create
/// /tasks/search/{query}            title/description search (with project)
/// /tasks/project/{project_id}      tasks of one project
/// /tasks/status/{status}           tasks in one status (with project)
/// /tasks/{id}                      get, update, delete
/// /tasks/{id}/status               status-only update (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
}

/// Fallback for any path no route matches.
pub async fn route_not_found() -> impl IntoResponse {
    let body = json!({
        "success": false,
        "message": "Route not found",
        "code": "NOT_FOUND",
    });
    (StatusCode::NOT_FOUND, Json(body))
}
