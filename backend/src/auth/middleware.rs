//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token on each request and attaches the resolved
//! `AuthenticatedPrincipal` to the request extensions for downstream handlers.

use crate::api::common::{HttpError, service_error_to_http};
use crate::auth::models::AuthenticatedPrincipal;
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::utils::jwt::TokenService;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Extracts and verifies the bearer token carried by `headers`.
///
/// # Errors
/// - `ServiceError::Unauthenticated` when there is no `Bearer <token>` header
/// - `ServiceError::TokenInvalid` / `ServiceError::TokenExpired` from verification
pub fn authorize_bearer(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> ServiceResult<AuthenticatedPrincipal> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ServiceError::unauthenticated("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ServiceError::unauthenticated("Expected a Bearer token"))?;

    tokens.verify(token)
}

/// JWT authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    match authorize_bearer(request.headers(), &state.tokens) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            Ok(next.run(request).await)
        }
        Err(error) => {
            tracing::debug!(
                "Rejected {} {}: {}",
                request.method(),
                request.uri().path(),
                error
            );
            Err(service_error_to_http(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn tokens() -> TokenService {
        TokenService::new("test-signing-secret", 3600, 0).unwrap()
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_token() {
        let tokens = tokens();
        let principal = AuthenticatedPrincipal {
            user_id: 1,
            email: "a@x.com".to_string(),
        };
        let token = tokens.issue(&principal).unwrap();

        let headers = headers_with(&format!("Bearer {token}"));
        let resolved = authorize_bearer(&headers, &tokens).unwrap();
        assert_eq!(resolved, principal);
    }

    #[test]
    fn test_missing_or_malformed_header() {
        let tokens = tokens();

        for headers in [
            HeaderMap::new(),
            headers_with("Basic dXNlcjpwYXNz"),
            headers_with("Bearer "),
            headers_with("bearer-token"),
        ] {
            let result = authorize_bearer(&headers, &tokens);
            assert!(matches!(result, Err(ServiceError::Unauthenticated { .. })));
        }
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let result = authorize_bearer(&headers_with("Bearer not.a.jwt"), &tokens());
        assert!(matches!(result, Err(ServiceError::TokenInvalid)));
    }
}
