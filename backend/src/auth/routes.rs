//! Defines the HTTP routes specifically for authentication.
//!
//! Login and registration are public; `/me` sits behind the access guard.

use crate::auth::handlers::*;
use crate::auth::middleware::require_auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route(
            "/me",
            get(me).layer(middleware::from_fn_with_state(state, require_auth)),
        )
}
