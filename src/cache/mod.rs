//! Cache Module
//!
//! Provides a bounded in-memory cache with least-recently-used eviction.

mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use lru::{NodeId, RecencyList};
pub use stats::CacheStats;
pub use store::BoundedCache;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1000;
