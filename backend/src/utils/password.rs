//! Password hashing and verification with bcrypt.
//!
//! Hashing is deliberately expensive, so both operations run on tokio's
//! blocking pool instead of the async workers that serve requests.

use crate::errors::{ServiceError, ServiceResult};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// bcrypt only looks at the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Cost factor bounds accepted by bcrypt.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalization";

/// Salted, adaptive password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash compared against on a user lookup miss, so that a missing account
    /// costs the same as a wrong password.
    dummy_hash: Arc<str>,
    /// Verifications run by this hasher and its clones.
    verifications: Arc<AtomicU64>,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost factor.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if bcrypt rejects the cost.
    pub fn new(cost: u32) -> ServiceResult<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost).map_err(|e| {
            ServiceError::validation(format!("Invalid bcrypt cost {}: {}", cost, e))
        })?;

        Ok(Self {
            cost,
            dummy_hash: Arc::from(dummy_hash),
            verifications: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of `verify` calls made so far, dummy ones included.
    pub fn verifications(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }

    /// Hashes a plaintext password.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` for an empty password or one longer
    /// than `MAX_PASSWORD_BYTES`.
    pub async fn hash(&self, plaintext: &str) -> ServiceResult<String> {
        check_password_input(plaintext)?;

        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash_blocking(&plaintext, cost))
            .await
            .map_err(|e| {
                ServiceError::internal_error(format!("Password hashing task failed: {}", e))
            })?
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `false` for a malformed hash instead of an error.
    pub async fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        let plaintext = plaintext.to_owned();
        let hashed = hashed.to_owned();

        match tokio::task::spawn_blocking(move || verify_blocking(&plaintext, &hashed)).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Runs a verification against the dummy hash and discards the result.
    pub async fn verify_dummy(&self, plaintext: &str) {
        let dummy_hash = Arc::clone(&self.dummy_hash);
        let _ = self.verify(plaintext, &dummy_hash).await;
    }
}

fn check_password_input(plaintext: &str) -> ServiceResult<()> {
    if plaintext.is_empty() {
        return Err(ServiceError::validation("Password must not be empty"));
    }
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(ServiceError::validation(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

fn hash_blocking(plaintext: &str, cost: u32) -> ServiceResult<String> {
    bcrypt::hash(plaintext, cost)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

fn verify_blocking(plaintext: &str, hashed: &str) -> bool {
    bcrypt::verify(plaintext, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_BCRYPT_COST).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = hasher();
        let hashed = hasher.hash("longenough1").await.unwrap();

        assert_ne!(hashed, "longenough1");
        assert!(hasher.verify("longenough1", &hashed).await);
        assert!(!hasher.verify("longenough2", &hashed).await);
    }

    #[tokio::test]
    async fn test_same_password_gets_distinct_salts() {
        let hasher = hasher();
        let first = hasher.hash("same-password").await.unwrap();
        let second = hasher.hash("same-password").await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same-password", &first).await);
        assert!(hasher.verify("same-password", &second).await);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_false() {
        let hasher = hasher();
        assert!(!hasher.verify("anything", "not-a-bcrypt-hash").await);
        assert!(!hasher.verify("anything", "").await);
    }

    #[tokio::test]
    async fn test_rejects_empty_and_oversized_input() {
        let hasher = hasher();

        let empty = hasher.hash("").await;
        assert!(matches!(empty, Err(ServiceError::Validation { .. })));

        let oversized = "x".repeat(MAX_PASSWORD_BYTES + 1);
        let result = hasher.hash(&oversized).await;
        assert!(matches!(result, Err(ServiceError::Validation { .. })));

        let at_limit = "x".repeat(MAX_PASSWORD_BYTES);
        assert!(hasher.hash(&at_limit).await.is_ok());
    }

    #[tokio::test]
    async fn test_cost_is_embedded_in_hash() {
        let hasher = hasher();
        let hashed = hasher.hash("longenough1").await.unwrap();
        assert!(hashed.starts_with("$2b$04$"));
        assert_eq!(hasher.cost(), 4);
    }

    #[tokio::test]
    async fn test_dummy_verification_is_counted() {
        let hasher = hasher();
        let shared = hasher.clone();
        assert_eq!(hasher.verifications(), 0);

        hasher.verify_dummy("whatever").await;
        assert_eq!(hasher.verifications(), 1);

        let hashed = hasher.hash("longenough1").await.unwrap();
        assert!(!shared.verify("wrong-password", &hashed).await);
        assert_eq!(hasher.verifications(), 2);
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(PasswordHasher::new(MIN_BCRYPT_COST - 1).is_err());
        assert!(PasswordHasher::new(MAX_BCRYPT_COST + 1).is_err());
    }
}
