//! Shared application state handed to every handler.
//!
//! Built once at startup; everything inside is either cheap to clone or held
//! behind an `Arc`, and nothing is mutated after construction.

use crate::{
    config::Config,
    errors::ServiceResult,
    repositories::user_repository::{UserRepository, UserStore},
    utils::{jwt::TokenService, password::PasswordHasher},
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: Arc<dyn UserStore>,
    pub hasher: PasswordHasher,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wires the SQLite-backed user store, the hasher and the token service
    /// from configuration.
    pub fn new(config: &Config, pool: SqlitePool) -> ServiceResult<Self> {
        let users = Arc::new(UserRepository::new(pool.clone()));
        Self::with_user_store(config, pool, users)
    }

    /// Same as `new` but with a caller-supplied credential store.
    pub fn with_user_store(
        config: &Config,
        pool: SqlitePool,
        users: Arc<dyn UserStore>,
    ) -> ServiceResult<Self> {
        Ok(Self {
            pool,
            users,
            hasher: PasswordHasher::new(config.bcrypt_cost)?,
            tokens: Arc::new(TokenService::from_config(config)?),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::Database;
    use crate::utils::password::MIN_BCRYPT_COST;

    pub fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-signing-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            jwt_leeway_seconds: 0,
            bcrypt_cost: MIN_BCRYPT_COST,
            server_port: 0,
        }
    }

    pub async fn test_state() -> AppState {
        let config = test_config();
        let db = Database::new(&config).await.unwrap();
        db.migrate().await.unwrap();
        AppState::new(&config, db.pool().clone()).unwrap()
    }

    #[tokio::test]
    async fn test_state_uses_configured_services() {
        let state = test_state().await;
        assert_eq!(state.hasher.cost(), MIN_BCRYPT_COST);
        assert_eq!(state.tokens.ttl_seconds(), 3600);
        assert_eq!(state.users.count().await.unwrap(), 0);
    }
}
