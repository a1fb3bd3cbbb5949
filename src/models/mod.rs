pub mod task;
pub mod user;

pub use task::{CreateTaskInput, Task, TaskFilter, TaskStatus, UpdateTaskStatus};
pub use user::{NewUser, User};
