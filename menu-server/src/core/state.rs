use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::auth::password::hash_password;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::user;
use crate::orders::OrderService;

/// Server state: shared handles for every request
///
/// Cheap to clone; all fields are reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | session token signing/validation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: JwtService) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            jwt_service: Arc::new(jwt_service),
        }
    }

    /// Initialize server state
    ///
    /// In order:
    /// 1. work directory structure
    /// 2. database pool + schema migration
    /// 3. bootstrap superuser (when `ADMIN_USERNAME`/`ADMIN_PASSWORD` are set)
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_url)
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        let jwt_service = JwtService::with_config(config.jwt.clone());
        let state = Self::new(config.clone(), db.pool, jwt_service);

        state.bootstrap_admin().await?;

        Ok(state)
    }

    async fn bootstrap_admin(&self) -> Result<(), ServerError> {
        let (Some(username), Some(password)) =
            (&self.config.admin_username, &self.config.admin_password)
        else {
            return Ok(());
        };

        let password_hash =
            hash_password(password).map_err(|e| ServerError::Bootstrap(e.to_string()))?;
        let created = user::ensure_superuser(&self.pool, username, &password_hash)
            .await
            .map_err(|e| ServerError::Bootstrap(e.to_string()))?;
        if created {
            tracing::info!(username = %username, "Bootstrap superuser created");
        }
        Ok(())
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.pool.clone())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
