//! FIFO (First In, First Out) cache replacement policy.
//!
//! Evicts the oldest surviving insertion when a new key arrives at capacity.
//! Reads and in-place updates never change an entry's position.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FifoCache<K, V> Layout                               │
//! │                                                                             │
//! │   map: FxHashMap<K, V>              order: VecDeque<K>                      │
//! │                                                                             │
//! │   ┌──────────┬──────┐          ┌──────────────────────────────┐             │
//! │   │   Key    │Value │          │ front                  back  │             │
//! │   ├──────────┼──────┤          ├──────────────────────────────┤             │
//! │   │   "A"    │  v1  │          │ [A]  [B]  [C]  [D]           │             │
//! │   │   "B"    │  v2  │          │  ↑                  ↑        │             │
//! │   │   "C"    │  v3  │          │ oldest           newest      │             │
//! │   │   "D"    │  v4  │          │ EVICT            keep        │             │
//! │   └──────────┴──────┘          └──────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! put("E", v) at capacity 4:
//!   1. "E" not in map
//!   2. pop_front → "A", remove from map, notify DISCARD: A
//!   3. push_back "E", insert into map
//! ```
//!
//! There is no arbitrary removal, so `order` never holds stale keys and the
//! front is always the live oldest entry.
//!
//! ## Operations
//!
//! | Operation     | Time | Notes                           |
//! |---------------|------|---------------------------------|
//! | `get`         | O(1) | map lookup, no reordering       |
//! | `put`         | O(1) | may evict the front             |
//! | `peek_oldest` | O(1) | next victim                     |
//! | `show`        | O(n) | oldest → newest                 |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = FifoCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A"); // reads do not matter to FIFO
//! cache.put("C", 3);
//!
//! assert!(!cache.contains(&"A"));
//! assert_eq!(cache.show(), vec![("B", 2), ("C", 3)]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ConfigError, InvariantError, validate_capacity};
use crate::listener::{DiscardHook, EvictionListener};
#[cfg(feature = "metrics")]
use crate::metrics::{CoreMetrics, CoreMetricsRecorder, CoreMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::{CoreCache, MAX_ITEMS};

/// Bounded cache evicting in insertion order.
pub struct FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, V>,
    /// Live keys, oldest at the front.
    order: VecDeque<K>,
    capacity: usize,
    hook: DiscardHook<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A zero capacity is accepted and yields a cache that stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hook: DiscardHook::new(),
            #[cfg(feature = "metrics")]
            metrics: CoreMetrics::default(),
        }
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        validate_capacity(capacity).map(Self::new)
    }

    /// Creates a cache that reports every eviction to `listener`.
    pub fn with_listener(capacity: usize, listener: impl EvictionListener<K, V> + 'static) -> Self {
        let mut cache = Self::new(capacity);
        cache.hook = DiscardHook::with_listener(listener);
        cache
    }

    /// Installs (or replaces) the eviction listener.
    pub fn set_listener(&mut self, listener: impl EvictionListener<K, V> + 'static) {
        self.hook.set(listener);
    }

    /// The entry that the next overflowing `put` would evict.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        let key = self.order.front()?;
        self.map.get(key).map(|value| (key, value))
    }

    /// Verifies that the map and the insertion order agree and fit in capacity.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "fifo holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.order.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "fifo order has {} keys, map has {}",
                self.order.len(),
                self.map.len()
            )));
        }
        let mut seen = FxHashSet::default();
        for key in &self.order {
            if !self.map.contains_key(key) {
                return Err(InvariantError::new("fifo order holds a key missing from the map"));
            }
            if !seen.insert(key) {
                return Err(InvariantError::new("fifo order holds a duplicate key"));
            }
        }
        Ok(())
    }

    fn evict_oldest(&mut self) {
        let Some(key) = self.order.pop_front() else {
            return;
        };
        if let Some(value) = self.map.remove(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.hook.notify("fifo", &key, &value);
        }
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("FifoCache invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return;
        }

        // Updates keep their original insertion position.
        if let Some(slot) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            *slot = value;
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            self.evict_oldest();
        }
        self.order.push_back(key.clone());
        self.map.insert(key, value);

        #[cfg(debug_assertions)]
        self.debug_validate();
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.map.get(key);
        #[cfg(feature = "metrics")]
        match value {
            Some(_) => self.metrics.record_get_hit(),
            None => self.metrics.record_get_miss(),
        }
        value
    }

    /// Oldest insertion first.
    fn show(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.order
            .iter()
            .filter_map(|key| self.map.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> Default for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// A cache bounded by [`MAX_ITEMS`].
    fn default() -> Self {
        Self::new(MAX_ITEMS)
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("hook", &self.hook)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{discard_log, discarded};

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: FifoCache<&str, i32> = FifoCache::new(10);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 10);
        }

        #[test]
        fn default_capacity_is_max_items() {
            let cache: FifoCache<&str, i32> = FifoCache::default();
            assert_eq!(cache.capacity(), MAX_ITEMS);
        }

        #[test]
        fn try_new_rejects_zero() {
            assert!(FifoCache::<&str, i32>::try_new(0).is_err());
            assert_eq!(FifoCache::<&str, i32>::try_new(3).unwrap().capacity(), 3);
        }

        #[test]
        fn put_and_get() {
            let mut cache = FifoCache::new(4);
            cache.put("A", "Hello");
            assert_eq!(cache.get(&"A"), Some(&"Hello"));
            assert_eq!(cache.get(&"Z"), None);
        }

        #[test]
        fn update_replaces_value_without_growing() {
            let mut cache = FifoCache::new(4);
            cache.put("k", 1);
            cache.put("k", 2);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"k"), Some(&2));
        }

        #[test]
        fn absent_input_is_ignored() {
            let mut cache: FifoCache<&str, i32> = FifoCache::new(4);
            cache.put_opt(None, Some(1));
            cache.put_opt(Some("a"), None);
            assert!(cache.is_empty());
            assert_eq!(cache.get_opt(None), None);
        }

        #[test]
        fn clear_empties_cache() {
            let mut cache = FifoCache::new(4);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.peek_oldest(), None);
            assert!(cache.check_invariants().is_ok());
        }
    }

    // ==============================================
    // FIFO Eviction Order
    // ==============================================

    mod fifo_behavior {
        use super::*;

        #[test]
        fn fifth_key_evicts_first_then_second() {
            let (log, listener) = discard_log::<&str, i32>();
            let mut cache = FifoCache::with_listener(4, listener);
            for (k, v) in [("A", 1), ("B", 2), ("C", 3), ("D", 4)] {
                cache.put(k, v);
            }
            assert!(discarded(&log).is_empty());

            cache.put("E", 5);
            assert_eq!(discarded(&log), vec!["A"]);

            cache.put("F", 6);
            assert_eq!(discarded(&log), vec!["A", "B"]);
            assert_eq!(cache.show(), vec![("C", 3), ("D", 4), ("E", 5), ("F", 6)]);
        }

        #[test]
        fn update_does_not_refresh_position() {
            let mut cache = FifoCache::new(3);
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(3, "c");

            cache.put(1, "a2");
            cache.put(4, "d");

            assert!(!cache.contains(&1), "update must not move key 1 to the back");
            assert!(cache.contains(&2));
            assert_eq!(cache.show(), vec![(2, "b"), (3, "c"), (4, "d")]);
        }

        #[test]
        fn reads_do_not_affect_eviction() {
            let mut cache = FifoCache::new(2);
            cache.put("a", 1);
            cache.put("b", 2);
            for _ in 0..10 {
                cache.get(&"a");
            }
            cache.put("c", 3);
            assert!(!cache.contains(&"a"));
        }

        #[test]
        fn peek_oldest_tracks_next_victim() {
            let mut cache = FifoCache::new(2);
            assert_eq!(cache.peek_oldest(), None);
            cache.put("a", 1);
            cache.put("b", 2);
            assert_eq!(cache.peek_oldest(), Some((&"a", &1)));
            cache.put("c", 3);
            assert_eq!(cache.peek_oldest(), Some((&"b", &2)));
        }

        #[test]
        fn update_at_capacity_never_evicts() {
            let (log, listener) = discard_log::<&str, i32>();
            let mut cache = FifoCache::with_listener(2, listener);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.put("a", 10);
            assert!(discarded(&log).is_empty());
            assert_eq!(cache.len(), 2);
        }
    }

    // ==============================================
    // Edge Cases
    // ==============================================

    mod edge_cases {
        use super::*;

        #[test]
        fn zero_capacity_stores_nothing() {
            let (log, listener) = discard_log::<&str, i32>();
            let mut cache = FifoCache::with_listener(0, listener);
            cache.put("a", 1);
            assert!(cache.is_empty());
            assert!(discarded(&log).is_empty());
        }

        #[test]
        fn single_capacity_replaces_every_time() {
            let mut cache = FifoCache::new(1);
            cache.put("a", 1);
            cache.put("b", 2);
            assert_eq!(cache.show(), vec![("b", 2)]);
        }

        #[test]
        fn set_listener_after_construction() {
            let mut cache = FifoCache::new(1);
            cache.put(1u32, "one");
            let (log, listener) = discard_log::<u32, &str>();
            cache.set_listener(listener);
            cache.put(2, "two");
            assert_eq!(discarded(&log), vec![1]);
        }

        #[test]
        fn render_matches_show_order() {
            let mut cache = FifoCache::default();
            cache.put("B", "World");
            cache.put("A", "Hello");
            assert_eq!(cache.render(), "Current cache:\nB: World\nA: Hello\n");
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_updates_evictions_and_gets() {
            let mut cache = FifoCache::new(1);
            cache.put("a", 1);
            cache.put("a", 2);
            cache.put("b", 3);
            cache.get(&"b");
            cache.get(&"a");

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.insert_new, 2);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.cache_len, 1);
        }
    }
}
