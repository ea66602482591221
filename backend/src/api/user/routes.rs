//! Defines the HTTP routes for user management.

use super::handlers::{create_user, delete_user, get_user_by_id, get_users, update_user};
use crate::auth::middleware::require_auth;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route(
            "/{id}",
            get(get_user_by_id).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
