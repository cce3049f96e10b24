//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a naive reference LRU.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::cache::BoundedCache;

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;

// == Strategies ==
/// Small key space so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

fn unique_keys_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}", min..max)
        .prop_map(|set| set.into_iter().collect::<Vec<String>>())
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Remove { key: u8 },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        6 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Clear),
    ]
}

// == Reference Model ==
/// Linear-time LRU kept as simple as possible: front = least recent.
struct ReferenceLru {
    capacity: usize,
    values: HashMap<u8, u32>,
    order: VecDeque<u8>,
}

impl ReferenceLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn touch(&mut self, key: u8) {
        self.order.retain(|k| *k != key);
        self.order.push_back(key);
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let value = self.values.get(&key).copied()?;
        self.touch(key);
        Some(value)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        let mut evicted = None;
        if !self.values.contains_key(&key) && self.values.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                let old_value = self.values.remove(&oldest).unwrap();
                evicted = Some((oldest, old_value));
            }
        }
        self.values.insert(key, value);
        self.touch(key);
        evicted
    }

    fn remove(&mut self, key: u8) -> Option<u32> {
        self.order.retain(|k| *k != key);
        self.values.remove(&key)
    }

    fn clear(&mut self) {
        self.values.clear();
        self.order.clear();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation agrees with the reference model, including which entry
    // is evicted and the full recency order afterwards.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut cache = BoundedCache::try_new(capacity).unwrap();
        let mut model = ReferenceLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    prop_assert_eq!(cache.put(key, value), model.put(key, value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(&key), model.remove(key));
                }
                CacheOp::Clear => {
                    cache.clear();
                    model.clear();
                }
            }

            let order: Vec<u8> = cache.keys().copied().collect();
            let expected: Vec<u8> = model.order.iter().copied().collect();
            prop_assert_eq!(order, expected);
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    // Cache size never exceeds capacity after any sequence of operations.
    #[test]
    fn prop_capacity_enforcement(ops in prop::collection::vec(cache_op_strategy(), 1..200)) {
        let mut cache = BoundedCache::try_new(TEST_CAPACITY).unwrap();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key, value);
                }
                CacheOp::Get { key } => {
                    cache.get(&key);
                }
                CacheOp::Remove { key } => {
                    cache.remove(&key);
                }
                CacheOp::Clear => cache.clear(),
            }
            prop_assert!(
                cache.len() <= TEST_CAPACITY,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                TEST_CAPACITY
            );
        }
    }

    // Puts that fit in capacity are all retrievable with their last value.
    #[test]
    fn prop_last_write_wins_within_capacity(
        writes in prop::collection::vec((key_strategy(), any::<u32>()), 1..64)
    ) {
        let distinct: HashSet<u8> = writes.iter().map(|(k, _)| *k).collect();
        let mut cache = BoundedCache::try_new(distinct.len()).unwrap();
        let mut last = HashMap::new();

        for (key, value) in writes {
            prop_assert!(cache.put(key, value).is_none(), "No eviction expected");
            last.insert(key, value);
        }

        prop_assert_eq!(cache.len(), last.len());
        for (key, value) in last {
            prop_assert_eq!(cache.get(&key), Some(&value));
        }
    }

    // Inserting capacity + 1 distinct keys evicts exactly the first one.
    #[test]
    fn prop_lru_eviction_order(
        keys in unique_keys_strategy(3, 10),
        new_key in "[0-9]{1,4}"
    ) {
        let capacity = keys.len();
        let mut cache = BoundedCache::try_new(capacity).unwrap();

        for key in &keys {
            cache.put(key.clone(), format!("value_{}", key));
        }
        prop_assert_eq!(cache.len(), capacity);

        let evicted = cache.put(new_key.clone(), "new".to_string());
        prop_assert_eq!(evicted.map(|(k, _)| k), Some(keys[0].clone()));
        prop_assert_eq!(cache.len(), capacity);

        prop_assert!(cache.get(&keys[0]).is_none());
        prop_assert!(cache.get(&new_key).is_some());
        for key in keys.iter().skip(1) {
            prop_assert!(cache.get(key).is_some(), "Key '{}' should remain", key);
        }
    }

    // A get on the oldest key moves eviction on to the second oldest.
    #[test]
    fn prop_lru_access_tracking(
        keys in unique_keys_strategy(3, 8),
        new_key in "[0-9]{1,4}"
    ) {
        let capacity = keys.len();
        let mut cache = BoundedCache::try_new(capacity).unwrap();

        for key in &keys {
            cache.put(key.clone(), key.len());
        }

        prop_assert!(cache.get(&keys[0]).is_some());
        let evicted = cache.put(new_key, 0);

        prop_assert_eq!(evicted.map(|(k, _)| k), Some(keys[1].clone()));
        prop_assert!(cache.contains(&keys[0]));
    }

    // After clear every key is gone and the cache is reusable.
    #[test]
    fn prop_clear_empties(writes in prop::collection::vec((key_strategy(), any::<u32>()), 1..40)) {
        let mut cache = BoundedCache::try_new(TEST_CAPACITY).unwrap();
        for (key, value) in &writes {
            cache.put(*key, *value);
        }

        cache.clear();

        prop_assert_eq!(cache.len(), 0);
        for (key, _) in &writes {
            prop_assert!(cache.get(key).is_none());
        }
        prop_assert_eq!(cache.capacity(), TEST_CAPACITY);
    }
}

// == Property Test for Caller-Managed Locking ==
// The cache has no internal locking; shared use goes through Arc<RwLock<_>>.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(25))]

    #[test]
    fn prop_shared_access_under_lock(ops in prop::collection::vec(cache_op_strategy(), 10..50)) {
        use std::sync::Arc;
        use tokio::sync::RwLock;

        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let cache = Arc::new(RwLock::new(
                BoundedCache::<u8, u32>::try_new(TEST_CAPACITY).unwrap(),
            ));

            let mut handles = vec![];
            for op in ops {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    let mut guard = cache.write().await;
                    match op {
                        CacheOp::Put { key, value } => {
                            guard.put(key, value);
                        }
                        CacheOp::Get { key } => {
                            guard.get(&key);
                        }
                        CacheOp::Remove { key } => {
                            guard.remove(&key);
                        }
                        CacheOp::Clear => guard.clear(),
                    }
                    guard.check_invariants()
                }));
            }

            for handle in handles {
                let result = handle.await.expect("Task should not panic");
                prop_assert!(result.is_ok(), "Invariant broken: {:?}", result);
            }

            let guard = cache.read().await;
            prop_assert!(guard.len() <= TEST_CAPACITY);
            let hit_rate = guard.stats().hit_rate();
            prop_assert!((0.0..=1.0).contains(&hit_rate));

            Ok(())
        })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_model_sanity() {
        let mut model = ReferenceLru::new(2);
        model.put(1, 10);
        model.put(2, 20);
        model.get(1);
        assert_eq!(model.put(3, 30), Some((2, 20)));
    }
}
