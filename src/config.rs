//! Configuration Module
//!
//! Handles loading application configuration from environment variables or
//! a JSON file.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{Result, ServiceError};

/// Application configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enables debug-level logging when no filter is given
    pub debug_mode: bool,
    /// Default tracing filter level
    pub log_level: String,
    /// Connection string; the scheme selects the backend
    pub database_url: String,
    /// Capacity of the product cache
    pub cache_size: usize,
    /// Capacity of the user cache
    pub user_cache_size: usize,
    /// Maximum database connections
    pub max_connections: u32,
    /// Attempts made for retried database writes
    pub retry_attempts: u32,
    /// Stats reporter interval in seconds
    pub stats_interval: u64,
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEBUG_MODE` - Debug logging (default: false)
    /// - `LOG_LEVEL` - Tracing level (default: info)
    /// - `DATABASE_URL` - Connection string (default: postgresql://localhost:5432/myapp)
    /// - `CACHE_SIZE` - Product cache capacity (default: 1000)
    /// - `USER_CACHE_SIZE` - User cache capacity (default: 500)
    /// - `MAX_CONNECTIONS` - Connection limit (default: 100)
    /// - `RETRY_ATTEMPTS` - Write attempts (default: 3)
    /// - `STATS_INTERVAL` - Stats reporting frequency in seconds (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debug_mode: env_or("DEBUG_MODE", defaults.debug_mode),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
            database_url: env_or("DATABASE_URL", defaults.database_url),
            cache_size: env_or("CACHE_SIZE", defaults.cache_size),
            user_cache_size: env_or("USER_CACHE_SIZE", defaults.user_cache_size),
            max_connections: env_or("MAX_CONNECTIONS", defaults.max_connections),
            retry_attempts: env_or("RETRY_ATTEMPTS", defaults.retry_attempts),
            stats_interval: env_or("STATS_INTERVAL", defaults.stats_interval),
        }
    }

    /// Loads configuration from a JSON file.
    ///
    /// Missing keys keep their defaults and unknown keys are ignored.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ServiceError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Parses configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ServiceError::Config(format!("Invalid config JSON: {}", e)))
    }

    /// Rejects values the services cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_size == 0 || self.user_cache_size == 0 {
            return Err(ServiceError::Config(
                "Cache sizes must be at least 1".to_string(),
            ));
        }
        if self.retry_attempts == 0 {
            return Err(ServiceError::Config(
                "retry_attempts must be at least 1".to_string(),
            ));
        }
        if self.stats_interval == 0 {
            return Err(ServiceError::Config(
                "stats_interval must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Tracing filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> String {
        let level = if self.debug_mode {
            "debug"
        } else {
            self.log_level.as_str()
        };
        format!("bounded_cache={}", level.to_ascii_lowercase())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_level: "info".to_string(),
            database_url: "postgresql://localhost:5432/myapp".to_string(),
            cache_size: DEFAULT_CAPACITY,
            user_cache_size: 500,
            max_connections: 100,
            retry_attempts: 3,
            stats_interval: 5,
        }
    }
}
