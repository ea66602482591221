//! User business logic service.
//!
//! Handles all user-related business operations. Plaintext passwords enter
//! here and leave as bcrypt hashes; nothing below this layer sees them.

use crate::api::common::PaginationFilter;
use crate::database::models::{CreateNewUser, UpdateUser, User, UserChanges};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::utils::password::PasswordHasher;
use validator::Validate;

pub struct UserService<'a> {
    /// Credential store holding the user records
    store: &'a dyn UserStore,
    /// Hasher applied to every password before it is persisted
    hasher: &'a PasswordHasher,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `store` - User persistence backend
    /// * `hasher` - Password hasher configured with the application's cost
    pub fn new(store: &'a dyn UserStore, hasher: &'a PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Creates a new user with full validation.
    ///
    /// # Arguments
    /// * `create_user` - User creation data transfer object
    ///
    /// # Returns
    /// The newly created User with all fields populated
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - An email already registered to another user
    pub async fn create_user(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        create_user.validate()?;

        if self.store.find_by_email(&create_user.email).await?.is_some() {
            return Err(ServiceError::already_exists("User", &create_user.email));
        }

        let password_hash = self.hasher.hash(&create_user.password).await?;

        // The UNIQUE constraint still catches a concurrent registration of the
        // same email between the check above and this insert.
        let user = self
            .store
            .create(&create_user.name, &create_user.email, &password_hash)
            .await?;

        tracing::info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Returns one page of users and the total user count.
    pub async fn list_users(
        &self,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<User>, u64)> {
        let users = self.store.list(pagination).await?;
        let total = self.store.count().await?;
        Ok((users, total))
    }

    /// Gets a user by ID, returning an error if not found.
    pub async fn get_user_required(&self, id: i64) -> ServiceResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    /// Applies a partial update. The password is re-hashed only when present.
    pub async fn update_user(&self, id: i64, update: UpdateUser) -> ServiceResult<User> {
        update.validate()?;

        if let Some(email) = &update.email {
            if let Some(existing) = self.store.find_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::already_exists("User", email));
                }
            }
        }

        let password_hash = match &update.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: update.name,
            email: update.email,
            password_hash,
        };

        let user = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        tracing::info!("Updated user {}", user.id);
        Ok(user)
    }

    /// Removes a user permanently and returns the removed record.
    pub async fn delete_user(&self, id: i64) -> ServiceResult<User> {
        let user = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        tracing::info!("Deleted user {} ({})", user.id, user.email);
        Ok(user)
    }
}
