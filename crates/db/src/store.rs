//! The persistence seam between services and storage backends.

use async_trait::async_trait;
use serde::Serialize;
use taskflow_core::task::TaskStatus;
use taskflow_core::types::DbId;

use crate::models::project::{NewProject, Project, UpdateProject};
use crate::models::task::{NewTask, Task, TaskChanges, TaskSummary};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Which tasks a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Project(DbId),
    Status(TaskStatus),
}

/// Result of deleting a project together with its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeDeleteOutcome {
    pub deleted_project: bool,
    pub deleted_tasks: u64,
}

/// Storage operations over the `projects` and `tasks` collections.
///
/// Every listing is ordered newest first (`created_at` descending, ties
/// broken by id descending). Text search is a case-insensitive substring
/// match.
#[async_trait]
pub trait TaskFlowStore: Send + Sync {
    /// Confirm the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;

    /// Fetch every project whose id is in `ids`. Unknown ids are skipped.
    async fn find_projects(&self, ids: &[DbId]) -> StoreResult<Vec<Project>>;

    async fn insert_project(&self, project: &NewProject) -> StoreResult<Project>;

    /// Returns `None` if no project has this id.
    async fn update_project(
        &self,
        id: DbId,
        changes: &UpdateProject,
    ) -> StoreResult<Option<Project>>;

    /// Delete every task referencing `id`, then the project itself, as one
    /// atomic unit.
    ///
    /// Tasks are removed whether or not the project still exists, so running
    /// this again after a partial failure cleans up and never errors.
    async fn delete_project_cascade(&self, id: DbId) -> StoreResult<CascadeDeleteOutcome>;

    /// Match `query` against project name or description.
    async fn search_projects(&self, query: &str) -> StoreResult<Vec<Project>>;

    async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>>;

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>>;

    async fn insert_task(&self, task: &NewTask) -> StoreResult<Task>;

    /// Returns `None` if no task has this id.
    async fn update_task(&self, id: DbId, changes: &TaskChanges) -> StoreResult<Option<Task>>;

    /// Set only `status` (and `updated_at`). Returns `None` if no task has this id.
    async fn update_task_status(&self, id: DbId, status: TaskStatus)
        -> StoreResult<Option<Task>>;

    /// Returns `true` if a task was removed.
    async fn delete_task(&self, id: DbId) -> StoreResult<bool>;

    /// Match `query` against task title or description.
    async fn search_tasks(&self, query: &str) -> StoreResult<Vec<Task>>;

    async fn task_summaries(&self, project_id: DbId) -> StoreResult<Vec<TaskSummary>>;

    /// `(status label, count)` for every status present in the project.
    async fn task_status_counts(&self, project_id: DbId) -> StoreResult<Vec<(String, i64)>>;
}
