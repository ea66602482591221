//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database, plus the request payloads that create or change them.
//! Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

#[derive(Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Payload for registering or creating a user. Carries the plaintext password
/// only until the service hashes it.
#[derive(Clone, Deserialize, Validate)]
pub struct CreateNewUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1-255 characters"
    ))]
    pub name: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 72,
        message = "Password must be between 8-72 characters"
    ))]
    pub password: String,
}

/// Partial update of a user. A present password is re-hashed before storage.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1-255 characters"
    ))]
    pub name: Option<String>,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: Option<String>,

    #[validate(length(
        min = 8,
        max = 72,
        message = "Password must be between 8-72 characters"
    ))]
    pub password: Option<String>,
}

/// Storage-level changes to a user row; the password is already hashed here.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1-255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1-255 characters"
    ))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<f64>,
}

/// Largest price the catalogue accepts: ten digits with two decimals.
pub const MAX_PRICE: f64 = 99_999_999.99;

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::new("price")
            .with_message("Price must be a non-negative number".into()));
    }
    if price > MAX_PRICE {
        return Err(ValidationError::new("price")
            .with_message("Price must be at most 99999999.99".into()));
    }
    Ok(())
}

/// Rounds a price to the two decimal places the catalogue stores.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
