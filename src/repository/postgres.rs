use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{CreateTaskInput, NewUser, Task, TaskFilter, TaskStatus, User};

const TASK_COLUMNS: &str = "id, title, description, status, user_id";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, salt) VALUES ($1, $2, $3)
             RETURNING id, username, password_hash, salt",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Username already exists".into())
            }
            other => other.into(),
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, salt FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` wildcards so the search term is matched literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn get_tasks(&self, filter: &TaskFilter, owner_id: i32) -> Result<Vec<Task>, AppError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM tasks WHERE user_id = ",
            TASK_COLUMNS
        ));
        query.push_bind(owner_id);

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(search) = &filter.search {
            let pattern = like_pattern(search);
            query
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        query.push(" ORDER BY id");

        let tasks = query
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32, owner_id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn create_task(&self, input: CreateTaskInput, owner_id: i32) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, user_id) VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(input.title)
        .bind(input.description)
        .bind(TaskStatus::Open)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update_status(&self, mut task: Task, status: TaskStatus) -> Result<Task, AppError> {
        task.status = status;

        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET status = $1 WHERE id = $2 AND user_id = $3 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.status)
        .bind(task.id)
        .bind(task.user_id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Task with ID {} not found", task.id)))
    }

    async fn delete_by_id(&self, id: i32, owner_id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
