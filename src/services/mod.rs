pub mod auth;
pub mod tasks;

pub use auth::{AuthService, CredentialStore};
pub use tasks::TaskService;
