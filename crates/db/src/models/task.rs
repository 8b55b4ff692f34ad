//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskflow_core::task::TaskStatus;
use taskflow_core::types::{DbId, Timestamp};

use crate::models::project::Project;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub project_id: DbId,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight view of a task, shown before a project delete so the user can
/// see what the cascade will remove.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TaskSummary {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
}

/// A task together with the project it references (`None` if that project
/// has since disappeared).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskWithProject {
    #[serde(flatten)]
    pub task: Task,
    pub project: Option<Project>,
}

/// Request body for creating a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<TaskStatus>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub due_date: Option<String>,
}

/// A validated task ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub project_id: DbId,
    pub due_date: Option<Timestamp>,
}

/// Request body for a partial task update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub project_id: Option<String>,
}

/// Validated partial update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub project_id: Option<DbId>,
}

/// Request body for `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Apply a partial update in place, refreshing `updated_at`.
    pub fn apply(&mut self, changes: &TaskChanges, now: Timestamp) {
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(project_id) = changes.project_id {
            self.project_id = project_id;
        }
        self.updated_at = now;
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}
