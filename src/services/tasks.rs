use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{CreateTaskInput, Task, TaskFilter, TaskStatus, User};
use crate::repository::TaskRepository;

fn task_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Task with ID {} not found", id))
}

/// Task operations on behalf of an authenticated user.
///
/// A task that belongs to someone else is reported exactly like one that does not exist.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    pub async fn get_tasks(&self, filter: &TaskFilter, user: &User) -> Result<Vec<Task>, AppError> {
        self.tasks.get_tasks(filter, user.id).await
    }

    pub async fn get_task_by_id(&self, id: i32, user: &User) -> Result<Task, AppError> {
        self.tasks
            .find_by_id(id, user.id)
            .await?
            .ok_or_else(|| task_not_found(id))
    }

    pub async fn create_task(&self, input: CreateTaskInput, user: &User) -> Result<Task, AppError> {
        input.validate()?;

        let task = self.tasks.create_task(input, user.id).await?;
        log::info!("user {} created task {}", user.id, task.id);
        Ok(task)
    }

    pub async fn update_status_by_id(
        &self,
        id: i32,
        status: TaskStatus,
        user: &User,
    ) -> Result<Task, AppError> {
        let task = self.get_task_by_id(id, user).await?;
        let updated = self.tasks.update_status(task, status).await?;
        log::info!("user {} set task {} to {}", user.id, id, status);
        Ok(updated)
    }

    pub async fn delete_task_by_id(&self, id: i32, user: &User) -> Result<(), AppError> {
        if self.tasks.delete_by_id(id, user.id).await? == 0 {
            return Err(task_not_found(id));
        }
        log::info!("user {} deleted task {}", user.id, id);
        Ok(())
    }
}
