//! Domain rules for TaskFlow projects and tasks.
//!
//! Everything here is pure: field validation, the task status enum, project
//! statistics arithmetic and search matching. Persistence lives in
//! `taskflow_db`; HTTP lives in `taskflow_api`.

pub mod error;
pub mod project;
pub mod search;
pub mod stats;
pub mod task;
pub mod types;
