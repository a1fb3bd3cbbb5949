pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

fn bad_request(err: impl std::fmt::Display, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Registers the route table. `AppState` must be provided as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    // Extraction failures (bad JSON, unknown status, non-numeric id) are all 400.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err: error::JsonPayloadError, req| bad_request(err, req)),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err: error::QueryPayloadError, req| bad_request(err, req)),
    )
    .app_data(
        web::PathConfig::default().error_handler(|err: error::PathError, req| bad_request(err, req)),
    )
    .service(
        web::scope("/auth")
            .service(auth::sign_up)
            .service(auth::sign_in),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task_status)
            .service(tasks::delete_task),
    );
}
