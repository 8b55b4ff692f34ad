#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A referenced record (the project a task points at) does not exist.
    #[error("{entity} not found")]
    Dependency { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn dependency(entity: &'static str, id: impl ToString) -> Self {
        Self::Dependency {
            entity,
            id: id.to_string(),
        }
    }
}
