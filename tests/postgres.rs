//! Store tests against a real Postgres. They need `DATABASE_URL` (read from `.env` too)
//! and return early without it.

use dotenv::dotenv;
use pretty_assertions::assert_eq;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use taskdesk::error::AppError;
use taskdesk::models::{CreateTaskInput, NewUser, Task, TaskFilter, TaskStatus, User};
use taskdesk::repository::{PgTaskRepository, PgUserRepository, TaskRepository, UserRepository};

async fn test_pool() -> Option<PgPool> {
    dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres store test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}

/// Usernames are unique across runs so tests never trip over old rows.
fn unique_name(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}_{}", prefix, nanos)
}

async fn create_user(users: &PgUserRepository, prefix: &str) -> User {
    users
        .insert(NewUser {
            username: unique_name(prefix),
            password_hash: "not-a-real-hash".into(),
            salt: "not-a-real-salt".into(),
        })
        .await
        .expect("Failed to insert user")
}

fn input(title: &str, description: &str) -> CreateTaskInput {
    CreateTaskInput {
        title: title.to_string(),
        description: description.to_string(),
    }
}

#[actix_rt::test]
async fn test_duplicate_username_is_conflict() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserRepository::new(pool);

    let first = create_user(&users, "pg_dup").await;
    let result = users
        .insert(NewUser {
            username: first.username.clone(),
            password_hash: "other".into(),
            salt: "other".into(),
        })
        .await;
    match result {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "Username already exists"),
        other => panic!("Expected Conflict, got {:?}", other),
    }

    let stored = users.find_by_username(&first.username).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "not-a-real-hash");
    assert_eq!(stored.salt, "not-a-real-salt");
}

#[actix_rt::test]
async fn test_other_owner_misses() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool);
    let owner = create_user(&users, "pg_owner").await;
    let intruder = create_user(&users, "pg_intruder").await;

    let task = tasks
        .create_task(input("private", "owner only"), owner.id)
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Open);
    assert_eq!(task.user_id, owner.id);

    assert!(tasks.find_by_id(task.id, intruder.id).await.unwrap().is_none());
    assert!(tasks
        .get_tasks(&TaskFilter::default(), intruder.id)
        .await
        .unwrap()
        .is_empty());

    // A task record carrying the wrong owner must not update the row.
    let forged = Task {
        user_id: intruder.id,
        ..task.clone()
    };
    assert!(matches!(
        tasks.update_status(forged, TaskStatus::Done).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(tasks.delete_by_id(task.id, intruder.id).await.unwrap(), 0);

    let unchanged = tasks.find_by_id(task.id, owner.id).await.unwrap();
    assert_eq!(unchanged, Some(task));
}

#[actix_rt::test]
async fn test_status_round_trips_through_enum_column() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool);
    let owner = create_user(&users, "pg_status").await;

    let task = tasks.create_task(input("cycle", ""), owner.id).await.unwrap();
    for status in [TaskStatus::InProgress, TaskStatus::Done, TaskStatus::Open] {
        let updated = tasks.update_status(task.clone(), status).await.unwrap();
        assert_eq!(updated.status, status);
        let fetched = tasks.find_by_id(task.id, owner.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, status);
    }
}

#[actix_rt::test]
async fn test_filters_by_status_and_search() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool);
    let owner = create_user(&users, "pg_filter").await;

    let wanted = tasks
        .create_task(input("test title", "test desc"), owner.id)
        .await
        .unwrap();
    let wanted = tasks
        .update_status(wanted, TaskStatus::InProgress)
        .await
        .unwrap();
    let open_match = tasks
        .create_task(input("another", "Testing later"), owner.id)
        .await
        .unwrap();
    tasks
        .create_task(input("groceries", "milk"), owner.id)
        .await
        .unwrap();

    let filter = TaskFilter {
        status: Some(TaskStatus::InProgress),
        search: Some("TEST".into()),
    };
    assert_eq!(
        tasks.get_tasks(&filter, owner.id).await.unwrap(),
        vec![wanted.clone()]
    );

    let filter = TaskFilter {
        status: None,
        search: Some("test".into()),
    };
    assert_eq!(
        tasks.get_tasks(&filter, owner.id).await.unwrap(),
        vec![wanted, open_match]
    );
}

#[actix_rt::test]
async fn test_search_matches_wildcards_literally() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool);
    let owner = create_user(&users, "pg_wildcard").await;

    let percent = tasks
        .create_task(input("reach 100% coverage", ""), owner.id)
        .await
        .unwrap();
    let underscore = tasks
        .create_task(input("rename snake_case fields", ""), owner.id)
        .await
        .unwrap();
    tasks
        .create_task(input("plain task", "nothing special"), owner.id)
        .await
        .unwrap();

    for (search, expected) in [("%", vec![percent]), ("_", vec![underscore])] {
        let filter = TaskFilter {
            status: None,
            search: Some(search.into()),
        };
        assert_eq!(
            tasks.get_tasks(&filter, owner.id).await.unwrap(),
            expected,
            "search {:?}",
            search
        );
    }
}

#[actix_rt::test]
async fn test_delete_twice_affects_no_rows() {
    let Some(pool) = test_pool().await else { return };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool);
    let owner = create_user(&users, "pg_delete").await;

    let task = tasks.create_task(input("short lived", ""), owner.id).await.unwrap();
    assert_eq!(tasks.delete_by_id(task.id, owner.id).await.unwrap(), 1);
    assert_eq!(tasks.delete_by_id(task.id, owner.id).await.unwrap(), 0);
    assert!(tasks.find_by_id(task.id, owner.id).await.unwrap().is_none());
}
