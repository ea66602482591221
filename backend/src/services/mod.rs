//! Module for core business logic services.
//!
//! Services validate incoming payloads and orchestrate the repositories and
//! the password hasher. They are built per request from the shared state.

pub mod product_service;
pub mod user_service;
