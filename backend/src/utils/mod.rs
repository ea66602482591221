//! Collection of general utility modules.
//!
//! Holds the cryptographic helpers shared by the authentication flow and the
//! user services: token signing and password hashing.

pub mod jwt;
pub mod password;
