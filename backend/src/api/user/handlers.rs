//! Handler functions for user management API endpoints.
//!
//! These functions process requests for user data, delegate to `UserService`,
//! and wrap the results in the standard response envelope.

use crate::api::common::{
    ApiResponse, HttpError, PaginatedData, PaginationFilter, PaginationMeta,
    service_error_to_http, validation_error_response,
};
use crate::auth::models::AuthenticatedPrincipal;
use crate::database::models::{CreateNewUser, UpdateUser, User};
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

fn user_service(state: &AppState) -> UserService<'_> {
    UserService::new(state.users.as_ref(), &state.hasher)
}

/// Creates a user on behalf of an authenticated caller.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Json(payload): Json<CreateNewUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), HttpError> {
    tracing::info!("User {} creating user {}", principal.user_id, payload.email);

    let user = user_service(&state)
        .create_user(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user, "User created successfully")),
    ))
}

/// Lists users, one page at a time.
#[axum::debug_handler]
pub async fn get_users(
    State(state): State<AppState>,
    Query(filter): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<PaginatedData<User>>>, HttpError> {
    if let Err(validation_errors) = filter.validate() {
        return Err(validation_error_response(validation_errors));
    }

    let (users, total) = user_service(&state)
        .list_users(&filter)
        .await
        .map_err(service_error_to_http)?;

    let pagination_meta = PaginationMeta::from_filter(&filter, total);
    Ok(Json(ApiResponse::paginated(
        PaginatedData::new(users, total),
        pagination_meta,
        "Users retrieved successfully",
    )))
}

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, HttpError> {
    let user = user_service(&state)
        .get_user_required(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user,
        "User retrieved successfully",
    )))
}

/// Applies a partial update to a user.
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<ApiResponse<User>>, HttpError> {
    tracing::info!("User {} updating user {}", principal.user_id, id);

    let user = user_service(&state)
        .update_user(id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(user, "User updated successfully")))
}

/// Deletes a user and returns the removed record.
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, HttpError> {
    tracing::info!("User {} deleting user {}", principal.user_id, id);

    let user = user_service(&state)
        .delete_user(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(user, "User deleted successfully")))
}
