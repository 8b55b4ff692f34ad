//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a project. Fields are trimmed and defaulted by
/// the service before anything is stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// A validated project ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Partial update for a project. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl Project {
    /// Apply a partial update in place, refreshing `updated_at`.
    pub fn apply(&mut self, changes: &UpdateProject, now: Timestamp) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(color) = &changes.color {
            self.color.clone_from(color);
        }
        self.updated_at = now;
    }
}
