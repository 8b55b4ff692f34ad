//! Handlers for the `/projects` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_core::stats::ProjectStats;
use taskflow_db::models::project::{CreateProject, Project, UpdateProject};
use taskflow_db::models::task::TaskSummary;
use taskflow_db::CascadeDeleteOutcome;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = state.projects.list_projects().await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    let Json(input) = payload?;
    let project = state.projects.create_project(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(project, "Project created successfully")),
    ))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let project = state
        .projects
        .get_project(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", &id))?;
    Ok(Json(ApiResponse::ok(project)))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProject>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let Json(input) = payload?;
    let project = state
        .projects
        .update_project(&id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", &id))?;
    Ok(Json(ApiResponse::with_message(
        project,
        "Project updated successfully",
    )))
}

/// DELETE /api/projects/{id}
///
/// Removes the project and every task that references it. Responds 404 if
/// the project did not exist, even though stray tasks were still swept.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CascadeDeleteOutcome>>> {
    let outcome = state.projects.delete_project(&id).await?;
    if !outcome.deleted_project {
        return Err(CoreError::not_found("Project", &id).into());
    }
    let message = format!(
        "Project and {} associated task(s) deleted successfully",
        outcome.deleted_tasks
    );
    Ok(Json(ApiResponse::with_message(outcome, message)))
}

/// GET /api/projects/{id}/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProjectStats>>> {
    let stats = state.projects.project_stats(&id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/projects/{id}/tasks
pub async fn associated_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<TaskSummary>>>> {
    let tasks = state.projects.associated_tasks(&id).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// GET /api/projects/search/{query}
pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = state.projects.search_projects(&query).await?;
    Ok(Json(ApiResponse::ok(projects)))
}
