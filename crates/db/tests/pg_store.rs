//! Integration tests for the PostgreSQL store.
//!
//! These need a reachable PostgreSQL server (`DATABASE_URL`), so they are
//! ignored by default. Run with `cargo test -p taskflow-db -- --ignored`.

use assert_matches::assert_matches;
use sqlx::PgPool;
use taskflow_core::task::TaskStatus;
use taskflow_db::models::project::{NewProject, UpdateProject};
use taskflow_db::models::task::{NewTask, TaskChanges};
use taskflow_db::{PgStore, TaskFilter, TaskFlowStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: String::new(),
        color: "#3B82F6".to_string(),
    }
}

fn new_task(project_id: uuid::Uuid, title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        status: TaskStatus::New,
        project_id,
        due_date: None,
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_and_find_project(pool: PgPool) {
    let store = PgStore::new(pool);
    let created = store.insert_project(&new_project("Launch")).await.unwrap();

    let found = store.find_project(created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Launch");
    assert_eq!(found.color, "#3B82F6");
    assert_eq!(found.description, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let created = store.insert_project(&new_project("Original")).await.unwrap();

    let changes = UpdateProject {
        color: Some("#10B981".to_string()),
        ..Default::default()
    };
    let updated = store
        .update_project(created.id, &changes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Original");
    assert_eq!(updated.color, "#10B981");
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_bad_color_rejected_by_check_constraint(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut project = new_project("Bad color");
    project.color = "blue".to_string();

    let result = store.insert_project(&project).await;
    assert_matches!(result, Err(taskflow_db::StoreError::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_search_escapes_wildcards(pool: PgPool) {
    let store = PgStore::new(pool);
    store.insert_project(&new_project("Marketing Launch")).await.unwrap();
    store.insert_project(&new_project("100% done")).await.unwrap();

    assert_eq!(store.search_projects("ING LA").await.unwrap().len(), 1);
    assert_eq!(store.search_projects("%").await.unwrap().len(), 1);
    assert_eq!(store.search_projects("_").await.unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Tasks and cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_cascade_delete_removes_tasks(pool: PgPool) {
    let store = PgStore::new(pool);
    let project = store.insert_project(&new_project("Doomed")).await.unwrap();
    store.insert_task(&new_task(project.id, "a")).await.unwrap();
    store.insert_task(&new_task(project.id, "b")).await.unwrap();

    let outcome = store.delete_project_cascade(project.id).await.unwrap();
    assert!(outcome.deleted_project);
    assert_eq!(outcome.deleted_tasks, 2);

    let left = store
        .list_tasks(TaskFilter::Project(project.id))
        .await
        .unwrap();
    assert!(left.is_empty());

    let again = store.delete_project_cascade(project.id).await.unwrap();
    assert!(!again.deleted_project);
    assert_eq!(again.deleted_tasks, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_status_counts_and_updates(pool: PgPool) {
    let store = PgStore::new(pool);
    let project = store.insert_project(&new_project("Stats")).await.unwrap();
    let a = store.insert_task(&new_task(project.id, "a")).await.unwrap();
    let b = store.insert_task(&new_task(project.id, "b")).await.unwrap();

    store
        .update_task_status(a.id, TaskStatus::Completed)
        .await
        .unwrap();
    store
        .update_task(
            b.id,
            &TaskChanges {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut counts = store.task_status_counts(project.id).await.unwrap();
    counts.sort();
    assert_eq!(
        counts,
        vec![("completed".to_string(), 1), ("in-progress".to_string(), 1)]
    );
}
