//! Error types for the cache and its services
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the bounded cache itself.
///
/// Lookups never fail: a miss is `None`. Only construction and the
/// invariant check can produce an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity or another construction parameter is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Internal bookkeeping diverged (map and recency order disagree)
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

// == Service Error Enum ==
/// Errors raised by the services built on top of the cache.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Query issued before `connect` (or after `close`)
    #[error("Not connected to database")]
    NotConnected,

    /// Input data failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Query execution or row decoding failed
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Cache construction failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ServiceError {
    /// Whether repeating the failed operation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::NotConnected | ServiceError::Database(_))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Database(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service layer.
pub type Result<T> = std::result::Result<T, ServiceError>;
