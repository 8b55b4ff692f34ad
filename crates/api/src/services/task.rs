use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use taskflow_core::error::CoreError;
use taskflow_core::project::trim_field;
use taskflow_core::task::{parse_due_date, validate_description, validate_title, TaskStatus};
use taskflow_core::types::{parse_id, DbId};
use taskflow_db::models::project::Project;
use taskflow_db::models::task::{
    CreateTask, NewTask, Task, TaskChanges, TaskWithProject, UpdateTask,
};
use taskflow_db::{TaskFilter, TaskFlowStore};

use crate::error::AppResult;
use crate::services::ProjectService;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskFlowStore>,
    projects: ProjectService,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskFlowStore>, projects: ProjectService) -> Self {
        Self { store, projects }
    }

    /// All tasks, newest first.
    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        Ok(self.store.list_tasks(TaskFilter::All).await?)
    }

    pub async fn list_tasks_by_project(&self, project_id: &str) -> AppResult<Vec<Task>> {
        let Some(project_id) = parse_id(project_id) else {
            return Ok(Vec::new());
        };
        Ok(self.store.list_tasks(TaskFilter::Project(project_id)).await?)
    }

    pub async fn get_task(&self, id: &str) -> AppResult<Option<Task>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.find_task(id).await?)
    }

    /// Validate the input and confirm the referenced project exists before
    /// persisting. Nothing is written if the project is missing.
    pub async fn create_task(&self, input: CreateTask) -> AppResult<Task> {
        let title = input.title.as_deref().map(trim_field).unwrap_or_default();
        validate_title(&title)?;
        let description = input.description.as_deref().map(trim_field).unwrap_or_default();
        validate_description(&description)?;

        let raw_project_id = input
            .project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Validation("Project ID is required".to_string()))?;

        let due_date = input
            .due_date
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_due_date)
            .transpose()?;

        let project_id = self.require_project(raw_project_id).await?;

        let task = self
            .store
            .insert_task(&NewTask {
                title,
                description,
                status: input.status.unwrap_or_default(),
                project_id,
                due_date,
            })
            .await?;
        tracing::info!(
            task_id = %task.id,
            project_id = %task.project_id,
            status = %task.status,
            "Task created",
        );
        Ok(task)
    }

    /// Apply the supplied fields only. A new `projectId` must reference an
    /// existing project. Returns `None` if the task id does not resolve.
    pub async fn update_task(&self, id: &str, input: UpdateTask) -> AppResult<Option<Task>> {
        let mut changes = TaskChanges {
            title: input.title.as_deref().map(trim_field),
            description: input.description.as_deref().map(trim_field),
            status: input.status,
            project_id: None,
        };
        if let Some(title) = &changes.title {
            validate_title(title)?;
        }
        if let Some(description) = &changes.description {
            validate_description(description)?;
        }
        if let Some(raw) = input.project_id.as_deref() {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(CoreError::Validation("Project ID cannot be empty".to_string()).into());
            }
            changes.project_id = Some(self.require_project(raw).await?);
        }

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let task = self.store.update_task(id, &changes).await?;
        if let Some(task) = &task {
            tracing::info!(task_id = %task.id, "Task updated");
        }
        Ok(task)
    }

    /// Change only the status. Returns `None` if the task id does not resolve.
    pub async fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
    ) -> AppResult<Option<Task>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let task = self.store.update_task_status(id, status).await?;
        if let Some(task) = &task {
            tracing::info!(task_id = %task.id, status = %status, "Task status updated");
        }
        Ok(task)
    }

    /// Returns `true` if a task was removed.
    pub async fn delete_task(&self, id: &str) -> AppResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.store.delete_task(id).await?;
        if deleted {
            tracing::info!(task_id = %id, "Task deleted");
        }
        Ok(deleted)
    }

    pub async fn list_tasks_by_status(&self, status: TaskStatus) -> AppResult<Vec<TaskWithProject>> {
        let tasks = self.store.list_tasks(TaskFilter::Status(status)).await?;
        self.with_projects(tasks).await
    }

    pub async fn search_tasks(&self, query: &str) -> AppResult<Vec<TaskWithProject>> {
        let tasks = self.store.search_tasks(query).await?;
        self.with_projects(tasks).await
    }

    async fn require_project(&self, raw_id: &str) -> AppResult<DbId> {
        match self.projects.get_project(raw_id).await? {
            Some(project) => Ok(project.id),
            None => Err(CoreError::dependency("Project", raw_id).into()),
        }
    }

    /// Attach each task's project, fetched in one store call.
    async fn with_projects(&self, tasks: Vec<Task>) -> AppResult<Vec<TaskWithProject>> {
        let ids: Vec<DbId> = tasks
            .iter()
            .map(|task| task.project_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let projects: HashMap<DbId, Project> = self
            .store
            .find_projects(&ids)
            .await?
            .into_iter()
            .map(|project| (project.id, project))
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| {
                let project = projects.get(&task.project_id).cloned();
                TaskWithProject { task, project }
            })
            .collect())
    }
}
