use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{CreateTaskInput, NewUser, Task, TaskFilter, TaskStatus, User};

#[derive(Debug, Default)]
struct UserTable {
    next_id: i32,
    rows: BTreeMap<String, User>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(&user.username) {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        table.next_id += 1;
        let created = User {
            id: table.next_id,
            username: user.username,
            password_hash: user.password_hash,
            salt: user.salt,
        };
        table.rows.insert(created.username.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(username).cloned())
    }
}

#[derive(Debug, Default)]
struct TaskTable {
    next_id: i32,
    rows: BTreeMap<i32, Task>,
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    table: Arc<RwLock<TaskTable>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get_tasks(&self, filter: &TaskFilter, owner_id: i32) -> Result<Vec<Task>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|t| t.user_id == owner_id && filter.matches(t))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32, owner_id: i32) -> Result<Option<Task>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|t| t.user_id == owner_id)
            .cloned())
    }

    async fn create_task(&self, input: CreateTaskInput, owner_id: i32) -> Result<Task, AppError> {
        let mut table = self.table.write().await;

        table.next_id += 1;
        let task = Task {
            id: table.next_id,
            title: input.title,
            description: input.description,
            status: TaskStatus::Open,
            user_id: owner_id,
        };
        table.rows.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_status(&self, task: Task, status: TaskStatus) -> Result<Task, AppError> {
        let mut table = self.table.write().await;

        match table.rows.get_mut(&task.id) {
            Some(stored) if stored.user_id == task.user_id => {
                stored.status = status;
                Ok(stored.clone())
            }
            _ => Err(AppError::NotFound(format!(
                "Task with ID {} not found",
                task.id
            ))),
        }
    }

    async fn delete_by_id(&self, id: i32, owner_id: i32) -> Result<u64, AppError> {
        let mut table = self.table.write().await;

        let owned = table.rows.get(&id).is_some_and(|t| t.user_id == owner_id);
        if owned {
            table.rows.remove(&id);
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
