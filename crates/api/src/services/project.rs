use std::sync::Arc;

use taskflow_core::project::{
    color_or_default, trim_field, validate_color, validate_description, validate_name,
};
use taskflow_core::stats::ProjectStats;
use taskflow_core::types::parse_id;
use taskflow_db::models::project::{CreateProject, NewProject, Project, UpdateProject};
use taskflow_db::models::task::TaskSummary;
use taskflow_db::{CascadeDeleteOutcome, TaskFlowStore};

use crate::error::AppResult;

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn TaskFlowStore>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn TaskFlowStore>) -> Self {
        Self { store }
    }

    /// All projects, newest first.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        Ok(self.store.list_projects().await?)
    }

    pub async fn get_project(&self, id: &str) -> AppResult<Option<Project>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.find_project(id).await?)
    }

    /// Trim, default and validate the input, then persist it.
    pub async fn create_project(&self, input: CreateProject) -> AppResult<Project> {
        let project = NewProject {
            name: input.name.as_deref().map(trim_field).unwrap_or_default(),
            description: input.description.as_deref().map(trim_field).unwrap_or_default(),
            color: color_or_default(input.color.as_deref()),
        };
        validate_name(&project.name)?;
        validate_description(&project.description)?;
        validate_color(&project.color)?;

        let project = self.store.insert_project(&project).await?;
        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Apply the supplied fields only. Returns `None` if the id does not resolve.
    pub async fn update_project(
        &self,
        id: &str,
        input: UpdateProject,
    ) -> AppResult<Option<Project>> {
        let changes = UpdateProject {
            name: input.name.as_deref().map(trim_field),
            description: input.description.as_deref().map(trim_field),
            color: input.color.as_deref().map(str::trim).map(str::to_string),
        };
        if let Some(name) = &changes.name {
            validate_name(name)?;
        }
        if let Some(description) = &changes.description {
            validate_description(description)?;
        }
        if let Some(color) = &changes.color {
            validate_color(color)?;
        }

        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let project = self.store.update_project(id, &changes).await?;
        if let Some(project) = &project {
            tracing::info!(project_id = %project.id, "Project updated");
        }
        Ok(project)
    }

    /// Delete the project's tasks, then the project.
    ///
    /// Tasks referencing `id` are removed even when the project itself is
    /// already gone, so repeating the call is harmless.
    pub async fn delete_project(&self, id: &str) -> AppResult<CascadeDeleteOutcome> {
        let Some(id) = parse_id(id) else {
            return Ok(CascadeDeleteOutcome {
                deleted_project: false,
                deleted_tasks: 0,
            });
        };
        let outcome = self.store.delete_project_cascade(id).await?;
        tracing::info!(
            project_id = %id,
            deleted_project = outcome.deleted_project,
            deleted_tasks = outcome.deleted_tasks,
            "Project delete cascaded",
        );
        Ok(outcome)
    }

    /// Tasks a delete of this project would remove.
    pub async fn associated_tasks(&self, id: &str) -> AppResult<Vec<TaskSummary>> {
        let Some(id) = parse_id(id) else {
            return Ok(Vec::new());
        };
        Ok(self.store.task_summaries(id).await?)
    }

    pub async fn project_stats(&self, id: &str) -> AppResult<ProjectStats> {
        let Some(id) = parse_id(id) else {
            return Ok(ProjectStats::default());
        };
        let counts = self.store.task_status_counts(id).await?;
        Ok(ProjectStats::from_status_counts(counts))
    }

    pub async fn search_projects(&self, query: &str) -> AppResult<Vec<Project>> {
        Ok(self.store.search_projects(query).await?)
    }
}
