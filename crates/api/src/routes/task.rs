//! Route definitions for the `/tasks` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /search/{query}          -> search
/// GET    /project/{project_id}    -> list_by_project
/// GET    /status/{status}         -> list_by_status
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// PATCH  /{id}/status             -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/search/{query}", get(task::search))
        .route("/project/{project_id}", get(task::list_by_project))
        .route("/status/{status}", get(task::list_by_status))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/status", patch(task::update_status))
}
