//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secrets, and token lifetimes.
//! Configuration is loaded once at startup so a missing secret fails the
//! process immediately instead of failing the first request.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Secret for signing short-lived access tokens.
    pub access_token_secret: String,
    /// Secret for signing refresh tokens. Separate from the access secret
    /// so compromise of one cannot forge the other.
    pub refresh_token_secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let access_token_secret =
            env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET not set")?;

        let refresh_token_secret =
            env::var("REFRESH_TOKEN_SECRET").context("REFRESH_TOKEN_SECRET not set")?;

        let access_token_ttl_secs = env::var("ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<i64>()
            .context("ACCESS_TOKEN_TTL_SECS must be a valid number")?;

        let refresh_token_ttl_secs = env::var("REFRESH_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "600".to_string())
            .parse::<i64>()
            .context("REFRESH_TOKEN_TTL_SECS must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            access_token_secret,
            refresh_token_secret,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            server_port,
        })
    }
}
