//! JWT token utilities for authentication.
//!
//! Provides token issuance and verification for authenticated users. Tokens
//! are stateless HS256 JWTs: validity is fully determined by the signature and
//! the expiry embedded in the token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::auth::models::AuthenticatedPrincipal;
use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// JWT Claims structure binding a user identity
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email at issuance time
    pub email: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

/// Longest token lifetime accepted, about 68 years.
pub const MAX_TOKEN_TTL_SECONDS: u64 = i32::MAX as u64;

/// Largest clock skew tolerated on `exp`.
pub const MAX_LEEWAY_SECONDS: u64 = 86_400;

/// Issues and verifies signed, time-limited bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service from a signing secret, a TTL and the allowed
    /// clock skew on expiry.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` when the TTL is zero or above
    /// `MAX_TOKEN_TTL_SECONDS`, or the leeway is above `MAX_LEEWAY_SECONDS`.
    pub fn new(secret: &str, ttl_seconds: u64, leeway_seconds: u64) -> ServiceResult<Self> {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .filter(|_| (1..=MAX_TOKEN_TTL_SECONDS).contains(&ttl_seconds))
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "Token TTL must be between 1 and {} seconds",
                    MAX_TOKEN_TTL_SECONDS
                ))
            })?;

        if leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(ServiceError::validation(format!(
                "Token leeway must be at most {} seconds",
                MAX_LEEWAY_SECONDS
            )));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(TokenService {
            encoding_key,
            decoding_key,
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        Self::new(
            &config.jwt_secret,
            config.jwt_expires_in_seconds,
            config.jwt_leeway_seconds,
        )
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl.num_seconds() as u64
    }

    /// Issues a token for the principal, expiring one TTL from now.
    pub fn issue(&self, principal: &AuthenticatedPrincipal) -> ServiceResult<String> {
        self.issue_at(principal, Utc::now())
    }

    fn issue_at(
        &self,
        principal: &AuthenticatedPrincipal,
        issued_at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let exp = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ServiceError::internal_error("Token expiry out of range"))?;

        let claims = Claims {
            sub: principal.user_id.to_string(),
            email: principal.email.clone(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token.
    ///
    /// # Errors
    /// - `ServiceError::TokenExpired` if the signature is valid but the expiry elapsed
    /// - `ServiceError::TokenInvalid` for anything else (bad signature, malformed token)
    pub fn decode_claims(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::TokenInvalid,
            })
    }

    /// Verifies a token and resolves the principal it was issued for.
    pub fn verify(&self, token: &str) -> ServiceResult<AuthenticatedPrincipal> {
        let claims = self.decode_claims(token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| ServiceError::TokenInvalid)?;

        Ok(AuthenticatedPrincipal {
            user_id,
            email: claims.email,
        })
    }
}
