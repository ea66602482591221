//! Data structures for authentication-related entities.
//!
//! This module defines the login payloads and the sanitized identity attached
//! to authenticated requests.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        email(message = "Must be a valid email"),
        length(min = 1, message = "Email is required")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing the bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64, // Token expiration in seconds
}

/// Identity resolved from verified credentials or a verified token.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: i64,
    pub email: String,
}
