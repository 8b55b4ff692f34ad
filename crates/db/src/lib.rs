//! Persistence for TaskFlow projects and tasks.
//!
//! Services talk to a [`TaskFlowStore`]. [`PgStore`] backs it with
//! PostgreSQL through the zero-sized repositories in [`repositories`];
//! [`MemoryStore`] keeps everything in process for tests and local runs.

pub mod memory;
pub mod models;
pub mod pg_store;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryStore;
pub use pg_store::PgStore;
pub use store::{CascadeDeleteOutcome, StoreError, StoreResult, TaskFilter, TaskFlowStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
