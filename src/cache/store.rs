//! Bounded Cache Module
//!
//! Main cache engine combining HashMap storage with O(1) recency tracking.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::trace;

use crate::cache::lru::{NodeId, RecencyList};
use crate::cache::{CacheStats, DEFAULT_CAPACITY};
use crate::error::CacheError;

/// Upper bound on storage reserved up front; larger caches grow on demand.
const MAX_PREALLOC: usize = 4096;

#[derive(Debug)]
struct Slot<V> {
    value: V,
    node: NodeId,
}

// == Bounded Cache ==
/// Fixed-capacity key/value store with least-recently-used eviction.
///
/// A successful `get` or any `put` makes the key the most recently used.
/// When a `put` of a new key would exceed capacity, exactly one entry (the
/// least recently used) is evicted first.
///
/// The cache performs no locking; wrap it in a lock to share it.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage, each entry holding its recency handle
    entries: HashMap<K, Slot<V>>,
    /// Keys ordered from least to most recently used
    order: RecencyList<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidConfiguration` if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, CacheError> {
        if capacity < 1 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }

        let reserved = capacity.min(MAX_PREALLOC);
        Ok(Self {
            entries: HashMap::with_capacity(reserved),
            order: RecencyList::with_capacity(reserved),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    /// Creates a cache with [`DEFAULT_CAPACITY`] entries.
    pub fn with_default_capacity() -> Self {
        Self {
            entries: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// A miss returns `None` and leaves the cache contents untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(slot) => {
                self.order.touch(slot.node);
                self.stats.record_hit();
                Some(&slot.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists its value is overwritten and no eviction
    /// happens. Otherwise, if the cache is full, the least recently used
    /// entry is evicted and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            self.order.touch(slot.node);
            self.stats.record_update();
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let node = self.order.push_back(key.clone());
        self.entries.insert(key, Slot { value, node });
        self.stats.record_insert();
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.order.remove(slot.node);
        self.stats.set_total_entries(self.entries.len());
        Some(slot.value)
    }

    // == Clear ==
    /// Removes all entries. Capacity and counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Peek ==
    /// Returns a value without touching recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns the key that the next overflowing `put` would evict.
    pub fn peek_lru(&self) -> Option<&K> {
        self.order.front()
    }

    /// Iterates keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Invariants ==
    /// Verifies that the map and the recency order describe the same keys.
    pub fn check_invariants(&self) -> Result<(), CacheError> {
        if self.entries.len() > self.capacity {
            return Err(CacheError::Invariant(format!(
                "{} entries exceed capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        if self.entries.len() != self.order.len() {
            return Err(CacheError::Invariant(format!(
                "map holds {} entries but recency order holds {}",
                self.entries.len(),
                self.order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.order.len());
        for key in self.order.iter() {
            if !seen.insert(key) {
                return Err(CacheError::Invariant(
                    "key appears twice in recency order".to_string(),
                ));
            }
            let linked = self
                .entries
                .get(key)
                .and_then(|slot| self.order.get(slot.node));
            if linked != Some(key) {
                return Err(CacheError::Invariant(
                    "recency key has no matching map entry".to_string(),
                ));
            }
        }
        if seen.len() != self.order.len() {
            return Err(CacheError::Invariant(
                "recency order is shorter than its length".to_string(),
            ));
        }

        Ok(())
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        let slot = self.entries.remove(&key)?;
        self.stats.record_eviction();
        trace!(
            capacity = self.capacity,
            evictions = self.stats.evictions,
            "Evicted least recently used entry"
        );
        Some((key, slot.value))
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
