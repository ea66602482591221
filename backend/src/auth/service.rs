//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::{CreateNewUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::services::user_service::UserService;
use crate::utils::jwt::TokenService;
use crate::utils::password::PasswordHasher;
use validator::Validate;

/// Authentication service for credential checks, token issuance and
/// self-registration
pub struct AuthService<'a> {
    store: &'a dyn UserStore,
    hasher: &'a PasswordHasher,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(
        store: &'a dyn UserStore,
        hasher: &'a PasswordHasher,
        tokens: &'a TokenService,
    ) -> Self {
        AuthService {
            store,
            hasher,
            tokens,
        }
    }

    /// Checks an email/password pair against the credential store.
    ///
    /// An unknown email and a wrong password both fail with
    /// `ServiceError::AuthenticationFailed`. On an unknown email the password
    /// is still run through bcrypt against a dummy hash.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> ServiceResult<AuthenticatedPrincipal> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.hasher.verify_dummy(password).await;
                tracing::info!("Login failed for {}", email);
                return Err(ServiceError::AuthenticationFailed);
            }
        };

        if !self.hasher.verify(password, &user.password_hash).await {
            tracing::info!("Login failed for {}", email);
            return Err(ServiceError::AuthenticationFailed);
        }

        Ok(AuthenticatedPrincipal {
            user_id: user.id,
            email: user.email,
        })
    }

    /// Authenticates the credentials and issues a bearer token.
    ///
    /// Malformed credentials fail the same way as wrong ones.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(e) = login_request.validate() {
            tracing::debug!("Rejected malformed login request: {}", e);
            return Err(ServiceError::AuthenticationFailed);
        }

        let principal = self
            .authenticate(&login_request.email, &login_request.password)
            .await?;
        let access_token = self.tokens.issue(&principal)?;

        tracing::info!("User {} logged in", principal.user_id);

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.ttl_seconds(),
        })
    }

    /// Public self-registration.
    pub async fn register(&self, request: CreateNewUser) -> ServiceResult<User> {
        UserService::new(self.store, self.hasher)
            .create_user(request)
            .await
    }

    /// Loads the record behind a verified principal.
    pub async fn current_user(&self, principal: &AuthenticatedPrincipal) -> ServiceResult<User> {
        UserService::new(self.store, self.hasher)
            .get_user_required(principal.user_id)
            .await
    }
}
