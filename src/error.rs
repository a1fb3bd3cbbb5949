//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Stores and services return it directly, and the API layer hands it to Actix Web
//! unchanged: `AppError` implements `actix_web::error::ResponseError`, which turns every
//! variant into a status code and a `{"error": "..."}` JSON body.
//!
//! `From` implementations exist for the error types of the crates we build on
//! (`sqlx`, `validator`, `jsonwebtoken`, `bcrypt`) so that `?` works everywhere.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is required but missing (HTTP 401).
    Unauthorized(String),
    /// Malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist for the caller (HTTP 404).
    /// Also used for resources that exist but belong to someone else.
    NotFound(String),
    /// A uniqueness rule was violated, e.g. a taken username (HTTP 409).
    Conflict(String),
    /// Unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Input failed `validator` rules (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg)
            | AppError::ValidationError(msg) => msg,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Database details stay in the logs, not in the response body.
        let message = match self {
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                "Database error"
            }
            other => other.message(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// `RowNotFound` maps to `NotFound`, everything else to `DatabaseError`.
/// Unique violations are translated by the store that knows which constraint it hit.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
