use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// Liveness probe, outside authentication. Reports which storage backend is serving tasks.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "storage": state.storage,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BcryptHasher, JwtIssuer};
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_reports_storage_backend() {
        let state = AppState::in_memory(
            Arc::new(BcryptHasher::new(4)),
            Arc::new(JwtIssuer::new("health-secret", 60).unwrap()),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
        assert!(json["timestamp"].is_string());
    }
}
