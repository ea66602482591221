//! Handler functions for the product catalogue endpoints.

use crate::api::common::{
    ApiResponse, HttpError, PaginatedData, PaginationFilter, PaginationMeta,
    service_error_to_http, validation_error_response,
};
use crate::auth::models::AuthenticatedPrincipal;
use crate::database::models::{CreateProduct, Product, UpdateProduct};
use crate::services::product_service::ProductService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), HttpError> {
    tracing::info!("User {} creating product {}", principal.user_id, payload.name);

    let product = ProductService::new(&state.pool)
        .create_product(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(product, "Product created successfully")),
    ))
}

#[axum::debug_handler]
pub async fn get_products(
    State(state): State<AppState>,
    Query(filter): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<PaginatedData<Product>>>, HttpError> {
    if let Err(validation_errors) = filter.validate() {
        return Err(validation_error_response(validation_errors));
    }

    let (products, total) = ProductService::new(&state.pool)
        .list_products(&filter)
        .await
        .map_err(service_error_to_http)?;

    let pagination_meta = PaginationMeta::from_filter(&filter, total);
    Ok(Json(ApiResponse::paginated(
        PaginatedData::new(products, total),
        pagination_meta,
        "Products retrieved successfully",
    )))
}

#[axum::debug_handler]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Product>>, HttpError> {
    let product = ProductService::new(&state.pool)
        .get_product_required(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        product,
        "Product retrieved successfully",
    )))
}

#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProduct>,
) -> Result<Json<ApiResponse<Product>>, HttpError> {
    tracing::info!("User {} updating product {}", principal.user_id, id);

    let product = ProductService::new(&state.pool)
        .update_product(id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        product,
        "Product updated successfully",
    )))
}

#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Product>>, HttpError> {
    tracing::info!("User {} deleting product {}", principal.user_id, id);

    let product = ProductService::new(&state.pool)
        .delete_product(id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        product,
        "Product deleted successfully",
    )))
}
