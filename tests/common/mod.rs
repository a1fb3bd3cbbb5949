#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use std::sync::Arc;
use taskdesk::auth::{BcryptHasher, JwtIssuer, SignInResponse};
use taskdesk::routes::{self, health};
use taskdesk::AppState;

pub const JWT_SECRET: &str = "integration-test-secret";

/// In-memory state with a cheap bcrypt cost.
pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(
        Arc::new(BcryptHasher::new(4)),
        Arc::new(JwtIssuer::new(JWT_SECRET, 3600).unwrap()),
    ))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::config),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn sign_up<S, B>(app: &S, username: &str, password: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    test::call_service(app, req).await.status()
}

/// Registers `username` and returns a fresh access token for it.
pub async fn token_for<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    assert_eq!(
        sign_up(app, username, password).await,
        StatusCode::CREATED,
        "sign-up of {} failed",
        username
    );

    let req = test::TestRequest::post()
        .uri("/auth/signin")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "sign-in of {} failed", username);

    let body: SignInResponse = test::read_body_json(resp).await;
    body.access_token
}
