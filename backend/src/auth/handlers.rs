//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data and delegate to `auth::service` for the
//! credential checks and token issuance.

use crate::api::common::{ApiResponse, HttpError, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::{CreateNewUser, User};
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::Json as ResponseJson,
};

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(state.users.as_ref(), &state.hasher, &state.tokens)
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, HttpError> {
    match auth_service(&state).login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle self-registration request
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateNewUser>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<User>>), HttpError> {
    let user = auth_service(&state)
        .register(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(user, "User registered successfully")),
    ))
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> Result<ResponseJson<ApiResponse<User>>, HttpError> {
    let user = auth_service(&state)
        .current_user(&principal)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        user,
        "User retrieved successfully",
    )))
}
