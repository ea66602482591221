//! Database repository for user management operations.
//!
//! Provides the credential store used by authentication and the CRUD
//! operations behind the user endpoints.

use crate::{
    api::common::PaginationFilter,
    database::{
        is_unique_violation,
        models::{User, UserChanges},
    },
    errors::{ServiceError, ServiceResult},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Persistence boundary for user records.
///
/// Implementations enforce email uniqueness: a create or update that would
/// duplicate an email fails with `ServiceError::AlreadyExists`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>>;

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> ServiceResult<User>;

    /// Applies the present fields. `None` if no user has this id.
    async fn update(&self, id: i64, changes: UserChanges) -> ServiceResult<Option<User>>;

    /// Removes the user and returns the removed record, `None` if absent.
    async fn delete(&self, id: i64) -> ServiceResult<Option<User>>;

    async fn list(&self, pagination: &PaginationFilter) -> ServiceResult<Vec<User>>;

    async fn count(&self) -> ServiceResult<u64>;
}

/// SQLite-backed user store.
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cheap to clone)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_write_error(error: sqlx::Error, email: Option<&str>) -> ServiceError {
    if is_unique_violation(&error) {
        ServiceError::already_exists("User", email.unwrap_or_default())
    } else {
        error.into()
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, name: &str, email: &str, password_hash: &str) -> ServiceResult<User> {
        let now = Utc::now();

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, Some(email)))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> ServiceResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
            name = COALESCE(?, name),
            email = COALESCE(?, email),
            password_hash = COALESCE(?, password_hash),
            updated_at = ?
            WHERE id = ?
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, changes.email.as_deref()))
    }

    async fn delete(&self, id: i64) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users WHERE id = ?
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self, pagination: &PaginationFilter) -> ServiceResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn count(&self) -> ServiceResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}
