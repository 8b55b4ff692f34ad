//! Repository for the `tasks` table.

use sqlx::PgExecutor;
use taskflow_core::search::like_pattern;
use taskflow_core::task::TaskStatus;
use taskflow_core::types::{new_id, DbId};

use crate::models::task::{NewTask, Task, TaskChanges, TaskSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, status, project_id, due_date, created_at, updated_at";

const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (id, title, description, status, project_id, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.project_id)
            .bind(input.due_date)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks {NEWEST_FIRST}");
        sqlx::query_as::<_, Task>(&query).fetch_all(executor).await
    }

    pub async fn list_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 {NEWEST_FIRST}");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    pub async fn list_by_status<'e>(
        executor: impl PgExecutor<'e>,
        status: TaskStatus,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE status = $1 {NEWEST_FIRST}");
        sqlx::query_as::<_, Task>(&query)
            .bind(status.as_str())
            .fetch_all(executor)
            .await
    }

    /// Case-insensitive substring search over title and description.
    pub async fn search<'e>(
        executor: impl PgExecutor<'e>,
        query_text: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE title ILIKE $1 OR description ILIKE $1
             {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(like_pattern(query_text))
            .fetch_all(executor)
            .await
    }

    /// Title/description/status of every task in a project.
    pub async fn summaries_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<TaskSummary>, sqlx::Error> {
        let query = format!(
            "SELECT id, title, description, status FROM tasks WHERE project_id = $1 {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, TaskSummary>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Count a project's tasks grouped by raw status label.
    pub async fn count_by_status<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM tasks WHERE project_id = $1 GROUP BY status",
        )
        .bind(project_id)
        .fetch_all(executor)
        .await
    }

    pub async fn count_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &TaskChanges,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                project_id = COALESCE($5, project_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.map(TaskStatus::as_str))
            .bind(input.project_id)
            .fetch_optional(executor)
            .await
    }

    pub async fn update_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a task by ID. Returns `true` if a row was removed.
    pub async fn hard_delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every task referencing `project_id`. Returns the number removed.
    pub async fn delete_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
