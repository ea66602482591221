//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret, token lifetime and
//! password hashing cost.

use crate::utils::jwt::{MAX_LEEWAY_SECONDS, MAX_TOKEN_TTL_SECONDS};
use crate::utils::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub jwt_leeway_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?;
        let acquire_timeout_seconds = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECONDS", 3u64)?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_seconds = parse_or(&lookup, "JWT_EXPIRES_IN_SECONDS", 3600u64)?;
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&jwt_expires_in_seconds) {
            bail!(
                "JWT_EXPIRES_IN_SECONDS must be between 1 and {}",
                MAX_TOKEN_TTL_SECONDS
            );
        }

        let jwt_leeway_seconds = parse_or(&lookup, "JWT_LEEWAY_SECONDS", 0u64)?;
        if jwt_leeway_seconds > MAX_LEEWAY_SECONDS {
            bail!("JWT_LEEWAY_SECONDS must be at most {}", MAX_LEEWAY_SECONDS);
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", 10u32)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            bail!(
                "BCRYPT_COST must be between {} and {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST
            );
        }

        let server_port = parse_or(&lookup, "SERVER_PORT", 3000u16)?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            jwt_leeway_seconds,
            bcrypt_cost,
            server_port,
        })
    }
}

// The secret stays out of logs even when the config is printed at startup.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expires_in_seconds", &self.jwt_expires_in_seconds)
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("server_port", &self.server_port)
            .finish()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
