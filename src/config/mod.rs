//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database path (or sqlite:// URL)
    pub database_url: String,

    /// TMDB API bearer token
    ///
    /// Optional so the server can start without one (the catalog queries
    /// will fail with an upstream error until it is set).
    pub tmdb_api_token: Option<String>,

    /// Browser origin allowed by CORS (the frontend host)
    pub client_origin: String,

    /// Session lifetime in seconds
    pub session_lifetime_secs: i64,

    /// Upper bound on the image proxy cache, in bytes
    pub image_cache_max_bytes: usize,

    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./data/flickdeck.db".to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            tmdb_api_token: env::var("TMDB_API_TOKEN").ok(),

            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            session_lifetime_secs: env::var("SESSION_LIFETIME_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7 * 24 * 60 * 60),

            image_cache_max_bytes: env::var("IMAGE_CACHE_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024 * 1024),

            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        })
    }
}
