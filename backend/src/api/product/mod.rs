//! Module for product catalogue API endpoints.

pub mod handlers;
pub mod routes;
