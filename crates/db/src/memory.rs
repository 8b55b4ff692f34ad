//! In-process [`TaskFlowStore`] for tests and database-less local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use taskflow_core::search::matches_any;
use taskflow_core::task::TaskStatus;
use taskflow_core::types::{new_id, DbId};
use tokio::sync::RwLock;

use crate::models::project::{NewProject, Project, UpdateProject};
use crate::models::task::{NewTask, Task, TaskChanges, TaskSummary};
use crate::store::{CascadeDeleteOutcome, StoreResult, TaskFilter, TaskFlowStore};

#[derive(Debug, Default)]
struct Collections {
    projects: HashMap<DbId, Project>,
    tasks: HashMap<DbId, Task>,
}

/// Both collections behind a single lock, so multi-step writes such as the
/// cascading delete are atomic with respect to other callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_projects(mut projects: Vec<Project>) -> Vec<Project> {
    projects.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    projects
}

fn sort_tasks(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    tasks
}

#[async_trait]
impl TaskFlowStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let guard = self.inner.read().await;
        Ok(sort_projects(guard.projects.values().cloned().collect()))
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.inner.read().await.projects.get(&id).cloned())
    }

    async fn find_projects(&self, ids: &[DbId]) -> StoreResult<Vec<Project>> {
        let guard = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| guard.projects.get(id).cloned())
            .collect())
    }

    async fn insert_project(&self, project: &NewProject) -> StoreResult<Project> {
        let now = Utc::now();
        let record = Project {
            id: new_id(),
            name: project.name.clone(),
            description: project.description.clone(),
            color: project.color.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inner
            .write()
            .await
            .projects
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: DbId,
        changes: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        let mut guard = self.inner.write().await;
        Ok(guard.projects.get_mut(&id).map(|project| {
            project.apply(changes, Utc::now());
            project.clone()
        }))
    }

    async fn delete_project_cascade(&self, id: DbId) -> StoreResult<CascadeDeleteOutcome> {
        let mut guard = self.inner.write().await;

        let before = guard.tasks.len();
        guard.tasks.retain(|_, task| task.project_id != id);
        let deleted_tasks = (before - guard.tasks.len()) as u64;
        let deleted_project = guard.projects.remove(&id).is_some();

        Ok(CascadeDeleteOutcome {
            deleted_project,
            deleted_tasks,
        })
    }

    async fn search_projects(&self, query: &str) -> StoreResult<Vec<Project>> {
        let guard = self.inner.read().await;
        Ok(sort_projects(
            guard
                .projects
                .values()
                .filter(|p| matches_any(&[p.name.as_str(), p.description.as_str()], query))
                .cloned()
                .collect(),
        ))
    }

    async fn list_tasks(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let guard = self.inner.read().await;
        Ok(sort_tasks(
            guard
                .tasks
                .values()
                .filter(|task| match filter {
                    TaskFilter::All => true,
                    TaskFilter::Project(project_id) => task.project_id == project_id,
                    TaskFilter::Status(status) => task.status == status,
                })
                .cloned()
                .collect(),
        ))
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(self.inner.read().await.tasks.get(&id).cloned())
    }

    async fn insert_task(&self, task: &NewTask) -> StoreResult<Task> {
        let now = Utc::now();
        let record = Task {
            id: new_id(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            project_id: task.project_id,
            due_date: task.due_date,
            created_at: now,
            updated_at: now,
        };
        self.inner
            .write()
            .await
            .tasks
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_task(&self, id: DbId, changes: &TaskChanges) -> StoreResult<Option<Task>> {
        let mut guard = self.inner.write().await;
        Ok(guard.tasks.get_mut(&id).map(|task| {
            task.apply(changes, Utc::now());
            task.clone()
        }))
    }

    async fn update_task_status(
        &self,
        id: DbId,
        status: TaskStatus,
    ) -> StoreResult<Option<Task>> {
        let mut guard = self.inner.write().await;
        Ok(guard.tasks.get_mut(&id).map(|task| {
            task.status = status;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn delete_task(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.inner.write().await.tasks.remove(&id).is_some())
    }

    async fn search_tasks(&self, query: &str) -> StoreResult<Vec<Task>> {
        let guard = self.inner.read().await;
        Ok(sort_tasks(
            guard
                .tasks
                .values()
                .filter(|t| matches_any(&[t.title.as_str(), t.description.as_str()], query))
                .cloned()
                .collect(),
        ))
    }

    async fn task_summaries(&self, project_id: DbId) -> StoreResult<Vec<TaskSummary>> {
        let tasks = self.list_tasks(TaskFilter::Project(project_id)).await?;
        Ok(tasks.iter().map(Task::summary).collect())
    }

    async fn task_status_counts(&self, project_id: DbId) -> StoreResult<Vec<(String, i64)>> {
        let guard = self.inner.read().await;
        let mut counts: HashMap<TaskStatus, i64> = HashMap::new();
        for task in guard.tasks.values().filter(|t| t.project_id == project_id) {
            *counts.entry(task.status).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(status, count)| (status.as_str().to_string(), count))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: String::new(),
            color: "#3B82F6".to_string(),
        }
    }

    fn new_task(project_id: DbId, title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::New,
            project_id,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert_project(&new_project("First")).await.unwrap();
        let second = store.insert_project(&new_project("Second")).await.unwrap();

        let listed = store.list_projects().await.unwrap();
        assert_eq!(listed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn cascade_removes_only_the_projects_tasks() {
        let store = MemoryStore::new();
        let doomed = store.insert_project(&new_project("Doomed")).await.unwrap();
        let kept = store.insert_project(&new_project("Kept")).await.unwrap();
        store.insert_task(&new_task(doomed.id, "a")).await.unwrap();
        store.insert_task(&new_task(doomed.id, "b")).await.unwrap();
        let survivor = store.insert_task(&new_task(kept.id, "c")).await.unwrap();

        let outcome = store.delete_project_cascade(doomed.id).await.unwrap();
        assert_eq!(
            outcome,
            CascadeDeleteOutcome {
                deleted_project: true,
                deleted_tasks: 2
            }
        );

        let remaining = store.list_tasks(TaskFilter::All).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);
        assert!(store.find_project(kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cascade_is_idempotent_and_sweeps_orphans() {
        let store = MemoryStore::new();
        let missing = new_id();
        store.insert_task(&new_task(missing, "orphan")).await.unwrap();

        let first = store.delete_project_cascade(missing).await.unwrap();
        assert!(!first.deleted_project);
        assert_eq!(first.deleted_tasks, 1);

        let second = store.delete_project_cascade(missing).await.unwrap();
        assert!(!second.deleted_project);
        assert_eq!(second.deleted_tasks, 0);
    }

    #[tokio::test]
    async fn status_counts_group_by_label() {
        let store = MemoryStore::new();
        let project = store.insert_project(&new_project("P")).await.unwrap();
        let a = store.insert_task(&new_task(project.id, "a")).await.unwrap();
        store.insert_task(&new_task(project.id, "b")).await.unwrap();
        store
            .update_task_status(a.id, TaskStatus::Completed)
            .await
            .unwrap();

        let mut counts = store.task_status_counts(project.id).await.unwrap();
        counts.sort();
        assert_eq!(
            counts,
            vec![("completed".to_string(), 1), ("new".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn update_of_missing_records_returns_none() {
        let store = MemoryStore::new();
        assert!(store
            .update_project(new_id(), &UpdateProject::default())
            .await
            .unwrap()
            .is_none());
        assert!(store
            .update_task(new_id(), &TaskChanges::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_task(new_id()).await.unwrap());
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = MemoryStore::new();
        let project = store
            .insert_project(&NewProject {
                name: "Marketing Launch".to_string(),
                description: "Q3 campaign".to_string(),
                color: "#3B82F6".to_string(),
            })
            .await
            .unwrap();

        for query in ["launch", "MARKET", "ing la", "campaign"] {
            let hits = store.search_projects(query).await.unwrap();
            assert_eq!(hits.len(), 1, "query {query:?}");
            assert_eq!(hits[0].id, project.id);
        }
        assert!(store.search_projects("roadmap").await.unwrap().is_empty());
    }
}
