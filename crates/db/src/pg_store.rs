//! PostgreSQL-backed [`TaskFlowStore`].

use async_trait::async_trait;
use taskflow_core::task::TaskStatus;
use taskflow_core::types::DbId;

use crate::models::project::{NewProject, Project, UpdateProject};
use crate::models::task::{NewTask, Task, TaskChanges, TaskSummary};
use crate::repositories::{ProjectRepo, TaskRepo};
use crate::store::{CascadeDeleteOutcome, StoreResult, TaskFilter, TaskFlowStore};
use crate::DbPool;

/// Store that delegates to [`ProjectRepo`] / [`TaskRepo`] over a shared pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskFlowStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list(&self.pool).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_projects(&self, ids: &[DbId]) -> StoreResult<Vec<Project>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(ProjectRepo::find_by_ids(&self.pool, ids).await?)
    }

    async fn insert_project(&self, project: &NewProject) -> StoreResult<Project> {
        Ok(ProjectRepo::create(&self.pool, project).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        changes: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::update(&self.pool, id, changes).await?)
    }

    async fn delete_project_cascade(&self, id: DbId) -> StoreResult<CascadeDeleteOutcome> {
        let mut tx = self.pool.begin().await?;

        let counted = TaskRepo::count_by_project(&mut *tx, id).await?;
        let deleted_tasks = TaskRepo::delete_by_project(&mut *tx, id).await?;
        let deleted_project = ProjectRepo::hard_delete(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::debug!(
            project_id = %id,
            counted,
            deleted_tasks,
            deleted_project,
            "Cascading project delete committed",
        );

        Ok(CascadeDeleteOutcome {
            deleted_project,
            deleted_tasks,
        })
    }

    async fn search_projects(&self, query: &str) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::search(&self.pool, query).await?)
    }

    async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks = match filter {
            TaskFilter::All => TaskRepo::list(&self.pool).await?,
            TaskFilter::Project(project_id) => {
                TaskRepo::list_by_project(&self.pool, project_id).await?
            }
            TaskFilter::Status(status) => TaskRepo::list_by_status(&self.pool, status).await?,
        };
        Ok(tasks)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert_task(&self, task: &NewTask) -> StoreResult<Task> {
        Ok(TaskRepo::create(&self.pool, task).await?)
    }

    async fn update_task(&self, id: DbId, changes: &TaskChanges) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::update(&self.pool, id, changes).await?)
    }

    async fn update_task_status(
        &self,
        id: DbId,
        status: TaskStatus,
    ) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::update_status(&self.pool, id, status).await?)
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(TaskRepo::hard_delete(&self.pool, id).await?)
    }

    async fn search_tasks(&self, query: &str) -> StoreResult<Vec<Task>> {
        Ok(TaskRepo::search(&self.pool, query).await?)
    }

    async fn task_summaries(&self, project_id: DbId) -> StoreResult<Vec<TaskSummary>> {
        Ok(TaskRepo::summaries_by_project(&self.pool, project_id).await?)
    }

    async fn task_status_counts(&self, project_id: DbId) -> StoreResult<Vec<(String, i64)>> {
        Ok(TaskRepo::count_by_status(&self.pool, project_id).await?)
    }
}
