use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::Claims;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// The persisted user behind the request's access token.
///
/// Relies on `AuthMiddleware` having verified the token and stored its claims.
/// Fails with `Unauthorized` if the claims are absent or name a user that no
/// longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| {
                AppError::Unauthorized(
                    "Token claims not found in request. Ensure AuthMiddleware is active.".into(),
                )
            })?;
            let state = state.ok_or_else(|| {
                AppError::InternalServerError("Application state not configured".into())
            })?;

            let user = state.auth.resolve_user(&claims).await?;
            Ok(CurrentUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthCredentials, BcryptHasher, JwtIssuer, TokenPayload};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use std::sync::Arc;

    fn claims_for(username: &str) -> Claims {
        Claims {
            payload: TokenPayload {
                username: username.to_string(),
            },
            iat: 0,
            exp: usize::MAX,
        }
    }

    async fn state_with_user(username: &str) -> web::Data<AppState> {
        let state = AppState::in_memory(
            Arc::new(BcryptHasher::new(4)),
            Arc::new(JwtIssuer::new("extractor-secret", 60).unwrap()),
        );
        state
            .auth
            .sign_up(&AuthCredentials {
                username: username.to_string(),
                password: "Passw0rd".to_string(),
            })
            .await
            .unwrap();
        web::Data::new(state)
    }

    #[actix_rt::test]
    async fn test_current_user_extractor_success() {
        let req = test::TestRequest::default()
            .app_data(state_with_user("alice").await)
            .to_http_request();
        req.extensions_mut().insert(claims_for("alice"));

        let mut payload = Payload::None;
        let current = CurrentUser::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(current.0.username, "alice");
    }

    #[actix_rt::test]
    async fn test_current_user_extractor_without_claims() {
        let req = test::TestRequest::default()
            .app_data(state_with_user("alice").await)
            .to_http_request();

        let mut payload = Payload::None;
        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_current_user_extractor_unknown_user() {
        let req = test::TestRequest::default()
            .app_data(state_with_user("alice").await)
            .to_http_request();
        req.extensions_mut().insert(claims_for("mallory"));

        let mut payload = Payload::None;
        let err = CurrentUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
