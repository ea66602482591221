//! Defines the HTTP routes for the product catalogue.

use super::handlers::{
    create_product, delete_product, get_product_by_id, get_products, update_product,
};
use crate::auth::middleware::require_auth;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn product_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route(
            "/{id}",
            get(get_product_by_id)
                .patch(update_product)
                .delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
