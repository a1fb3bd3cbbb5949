use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// There is no transition graph: any status may be set from any other.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, not started.
    #[default]
    Open,
    /// Currently being worked on.
    InProgress,
    /// Completed.
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Owning user. Every query against tasks is scoped by it.
    pub user_id: i32,
}

/// Request body for `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring matched against title or description.
    #[validate(length(min = 1))]
    pub search: Option<String>,
}

impl TaskFilter {
    /// Whether `task` passes this filter. Ownership is not checked here.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Request body for `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}
