//! Inventory backend: user accounts, product catalogue and bearer-token
//! authentication over an axum REST API backed by SQLite.
//!
//! The binary in `main.rs` only loads configuration and serves the router
//! built here, so integration tests drive exactly what production serves.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

use crate::api::common::ApiResponse;
use crate::state::AppState;
use axum::{Router, response::Json, routing::get};
use tower_http::trace::TraceLayer;

/// Builds the full application router, with every API route under `/api/v1`.
pub fn build_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .nest("/auth", auth::routes::auth_router(state.clone()))
        .nest("/users", api::user::routes::user_router(state.clone()))
        .nest("/products", api::product::routes::product_router(state.clone()));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", v1_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Inventory Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the Inventory API",
    ))
}

async fn health_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({ "status": "ok" }),
        "Service is healthy",
    ))
}
