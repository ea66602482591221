//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the resource domains, users
//! and products, excluding the authentication routes which live in `auth`.

pub mod common;
pub mod product;
pub mod user;
