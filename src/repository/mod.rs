//! Persistence traits for users and tasks.
//!
//! Every task method takes the owner id as a required argument: there is no way to
//! read, change or delete a task by id alone.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{CreateTaskInput, NewUser, Task, TaskFilter, TaskStatus, User};

pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use postgres::{PgTaskRepository, PgUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `Conflict` when the username is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks of `owner_id` that pass `filter`, ordered by id.
    async fn get_tasks(&self, filter: &TaskFilter, owner_id: i32) -> Result<Vec<Task>, AppError>;

    async fn find_by_id(&self, id: i32, owner_id: i32) -> Result<Option<Task>, AppError>;

    /// Persists a new `OPEN` task owned by `owner_id`.
    async fn create_task(&self, input: CreateTaskInput, owner_id: i32) -> Result<Task, AppError>;

    /// Sets the status of an already located task and persists it under the task's
    /// own `(id, user_id)`. Fails with `NotFound` if the row vanished meanwhile.
    async fn update_status(&self, task: Task, status: TaskStatus) -> Result<Task, AppError>;

    /// Deletes the task matching both ids and returns the number of rows removed.
    async fn delete_by_id(&self, id: i32, owner_id: i32) -> Result<u64, AppError>;
}
