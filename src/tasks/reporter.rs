//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::service::SharedCache;

/// Spawns a background task that periodically logs a cache's statistics.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between reports. It takes a read lock only long enough to snapshot the
/// stats.
///
/// # Arguments
/// * `name` - Label attached to each report
/// * `cache` - Shared reference to the cache
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(BoundedCache::<u64, String>::try_new(100)?));
/// let reporter = spawn_stats_reporter("users", cache.clone(), 5);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter<K, V>(
    name: &'static str,
    cache: SharedCache<K, V>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            cache = name,
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.read().await.stats();

            if stats.hits + stats.misses > 0 {
                info!(
                    cache = name,
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    entries = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "Cache stats"
                );
            } else {
                debug!(cache = name, entries = stats.total_entries, "Cache idle");
            }
        }
    })
}
