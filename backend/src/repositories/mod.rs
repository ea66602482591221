//! Module for data access.
//!
//! Each repository owns the SQL for one table and hands back the models
//! defined in `database::models`.

pub mod product_repository;
pub mod user_repository;
