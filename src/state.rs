use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use crate::auth::{BcryptHasher, JwtIssuer, PasswordHasher, TokenIssuer};
use crate::config::Config;
use crate::error::AppError;
use crate::repository::{
    InMemoryTaskRepository, InMemoryUserRepository, PgTaskRepository, PgUserRepository,
    TaskRepository, UserRepository,
};
use crate::services::{AuthService, CredentialStore, TaskService};

/// Where users and tasks are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

/// Services shared by all workers, registered as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub storage: StorageBackend,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        storage: StorageBackend,
    ) -> Self {
        Self {
            auth: AuthService::new(CredentialStore::new(users, hasher), tokens),
            tasks: TaskService::new(tasks),
            storage,
        }
    }

    /// State backed by process memory; contents are lost on restart.
    pub fn in_memory(hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
            hasher,
            tokens,
            StorageBackend::Memory,
        )
    }

    /// Connects to Postgres and applies migrations, or falls back to memory
    /// when no `DATABASE_URL` is configured.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));
        let tokens = Arc::new(JwtIssuer::new(&config.jwt_secret, config.jwt_expires_in)?);

        let Some(database_url) = &config.database_url else {
            log::warn!("DATABASE_URL not set, using in-memory storage");
            return Ok(Self::in_memory(hasher, tokens));
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("connected to database, migrations applied");

        Ok(Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
            hasher,
            tokens,
            StorageBackend::Postgres,
        ))
    }
}
