//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept a PostgreSQL executor (pool or open transaction) as the
//! first argument.

pub mod project_repo;
pub mod task_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
