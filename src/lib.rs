#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Users sign up, sign in for a bearer token, and manage their own tasks. Every task"]
#![doc = "operation is scoped by the owning user; tasks of other users are reported as not found."]
#![doc = "The binary (`main.rs`) builds an [`state::AppState`] from [`config::Config`] and"]
#![doc = "serves [`routes::config`]."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use crate::error::AppError;
pub use crate::state::AppState;
