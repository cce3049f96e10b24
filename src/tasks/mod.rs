//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the demo runs.
//!
//! # Tasks
//! - Stats reporter: logs cache hit/miss/eviction counters at a fixed interval

mod reporter;

pub use reporter::spawn_stats_reporter;
