use std::sync::Arc;

use taskflow_db::TaskFlowStore;

use crate::config::ServerConfig;
use crate::services::{ProjectService, TaskService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing store, used directly only by the health check.
    pub store: Arc<dyn TaskFlowStore>,
    pub config: Arc<ServerConfig>,
    pub projects: ProjectService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskFlowStore>, config: ServerConfig) -> Self {
        let projects = ProjectService::new(Arc::clone(&store));
        let tasks = TaskService::new(Arc::clone(&store), projects.clone());
        Self {
            store,
            config: Arc::new(config),
            projects,
            tasks,
        }
    }
}
