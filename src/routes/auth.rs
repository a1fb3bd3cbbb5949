use crate::{auth::AuthCredentials, error::AppError, state::AppState};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: empty body.
/// - `400 Bad Request`: missing fields, or username/password rules not met.
/// - `409 Conflict`: the username is taken.
#[post("/signup")]
pub async fn sign_up(
    state: web::Data<AppState>,
    credentials: web::Json<AuthCredentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;
    state.auth.sign_up(&credentials).await?;
    Ok(HttpResponse::Created().finish())
}

/// Sign in
///
/// ## Responses:
/// - `200 OK`: `{"accessToken": "..."}`.
/// - `401 Unauthorized`: unknown username or wrong password, indistinguishably.
#[post("/signin")]
pub async fn sign_in(
    state: web::Data<AppState>,
    credentials: web::Json<AuthCredentials>,
) -> Result<impl Responder, AppError> {
    let response = state.auth.sign_in(&credentials).await?;
    Ok(HttpResponse::Ok().json(response))
}
