//! Authentication module for credential checks, token issuance and access control.
//!
//! This module provides the login and registration endpoints, the
//! `AuthService` behind them, and the middleware guarding protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
