//! Module for user management API endpoints.
//!
//! Registration lives under `auth`; these routes manage existing users and
//! all require a valid bearer token.

pub mod handlers;
pub mod routes;
