//! Query/mutation services over projects and tasks.
//!
//! Services own the field rules and the cross-aggregate behaviour (task ->
//! project reference checks, cascading delete, stats). Handlers only map
//! HTTP to service calls.
//!
//! Ids arrive as raw strings. A string that is not a valid id is treated
//! exactly like an id that does not resolve.

pub mod project;
pub mod task;

pub use project::ProjectService;
pub use task::TaskService;
