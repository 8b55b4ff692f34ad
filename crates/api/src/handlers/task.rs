//! Handlers for the `/tasks` resource.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_core::task::TaskStatus;
use taskflow_db::models::task::{CreateTask, Task, TaskWithProject, UpdateTask, UpdateTaskStatus};

use crate::error::AppResult;
use crate::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/tasks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let Json(input) = payload?;
    let task = state.tasks.create_task(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(task, "Task created successfully")),
    ))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Task>>> {
    let task = state
        .tasks
        .get_task(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", &id))?;
    Ok(Json(ApiResponse::ok(task)))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Task>>> {
    let Json(input) = payload?;
    let task = state
        .tasks
        .update_task(&id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", &id))?;
    Ok(Json(ApiResponse::with_message(task, "Task updated successfully")))
}

/// PATCH /api/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskStatus>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Task>>> {
    let Json(input) = payload?;
    let status = input
        .status
        .ok_or_else(|| CoreError::Validation("Status is required".to_string()))?;
    let task = state
        .tasks
        .update_task_status(&id, status)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", &id))?;
    Ok(Json(ApiResponse::with_message(
        task,
        "Task status updated successfully",
    )))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if state.tasks.delete_task(&id).await? {
        Ok(Json(MessageResponse::ok("Task deleted successfully")))
    } else {
        Err(CoreError::not_found("Task", &id).into())
    }
}

/// GET /api/tasks/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = state.tasks.list_tasks_by_project(&project_id).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// GET /api/tasks/status/{status}
///
/// Each task carries its resolved project (or `null`).
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<TaskWithProject>>>> {
    let status = TaskStatus::from_str(&status)?;
    let tasks = state.tasks.list_tasks_by_status(status).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}

/// GET /api/tasks/search/{query}
pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<TaskWithProject>>>> {
    let tasks = state.tasks.search_tasks(&query).await?;
    Ok(Json(ApiResponse::ok(tasks)))
}
