use std::sync::Arc;

use crate::auth::{
    AuthCredentials, Claims, PasswordHasher, SignInResponse, TokenIssuer, TokenPayload,
};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Persists users and checks their passwords.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Runs a hasher call on the blocking pool; bcrypt is CPU-bound.
    async fn with_hasher<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&dyn PasswordHasher) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || f(hasher.as_ref()))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Password task failed: {}", e)))?
    }

    /// Stores a new user with a salted hash of the password.
    /// A taken username surfaces as `Conflict` from the repository's unique constraint.
    pub async fn sign_up(&self, credentials: &AuthCredentials) -> Result<User, AppError> {
        let password = credentials.password.clone();
        let digest = self.with_hasher(move |h| h.hash(&password)).await?;

        self.users
            .insert(NewUser {
                username: credentials.username.clone(),
                password_hash: digest.hash,
                salt: digest.salt,
            })
            .await
    }

    /// Returns the username when the credentials match, `None` otherwise.
    pub async fn validate_credentials(
        &self,
        credentials: &AuthCredentials,
    ) -> Result<Option<String>, AppError> {
        match self.users.find_by_username(&credentials.username).await? {
            Some(user) => {
                let password = credentials.password.clone();
                let hash = user.password_hash.clone();
                if self.with_hasher(move |h| h.verify(&password, &hash)).await? {
                    Ok(Some(user.username))
                } else {
                    Ok(None)
                }
            }
            None => {
                // Spend a hash on unknown users too, so both misses take similar time.
                let password = credentials.password.clone();
                let _ = self.with_hasher(move |h| h.hash(&password)).await;
                Ok(None)
            }
        }
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_username(username).await
    }
}

/// Sign-up, sign-in and resolution of token holders to users.
#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialStore,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(credentials: CredentialStore, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    pub async fn sign_up(&self, credentials: &AuthCredentials) -> Result<(), AppError> {
        let user = self.credentials.sign_up(credentials).await?;
        log::info!("user {} signed up with id {}", user.username, user.id);
        Ok(())
    }

    pub async fn sign_in(&self, credentials: &AuthCredentials) -> Result<SignInResponse, AppError> {
        let username = match self.credentials.validate_credentials(credentials).await? {
            Some(username) => username,
            None => {
                log::warn!("failed sign-in for username {}", credentials.username);
                return Err(AppError::Unauthorized("Invalid credentials".into()));
            }
        };

        let access_token = self.tokens.issue(&TokenPayload { username })?;
        Ok(SignInResponse { access_token })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.verify(token)
    }

    /// Looks up the user a verified token speaks for.
    pub async fn resolve_user(&self, claims: &Claims) -> Result<User, AppError> {
        self.credentials
            .find_user(&claims.payload.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown user".into()))
    }
}
