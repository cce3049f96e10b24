//! Bounded Cache - A fixed-capacity in-memory LRU cache
//!
//! Provides a generic key/value cache with least-recently-used eviction,
//! plus stand-in user and product services that consume it.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use cache::{BoundedCache, CacheStats};
pub use config::Config;
pub use error::{CacheError, ServiceError};
pub use tasks::spawn_stats_reporter;
