use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Postgres connection string. When absent the server runs on the
    /// in-memory storage backend (useful for local development and demos).
    pub database_url: Option<String>,
    /// Base URL of the statistics service. When absent view counts read as
    /// zero instead of calling out.
    pub stats_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: env::var("DATABASE_URL").ok(),
            stats_url: env::var("STATS_SERVER_URL").ok(),
        })
    }
}
