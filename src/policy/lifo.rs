//! LIFO (Last In, First Out) cache replacement policy.
//!
//! Implements a stack-based eviction algorithm where the most recently inserted
//! surviving entry is evicted first when a new key arrives at capacity. This is
//! the opposite of FIFO.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        LifoCache<K, V> Layout                               │
//! │                                                                             │
//! │   map: FxHashMap<K, V>              stack: Vec<K>                           │
//! │                                                                             │
//! │   ┌──────────┬──────┐          ┌─────────────────────────┐                  │
//! │   │   Key    │Value │          │ Bottom        Top       │                  │
//! │   ├──────────┼──────┤          ├─────────────────────────┤                  │
//! │   │   "A"    │  v1  │          │ [A]  [B]  [C]  [D]      │                  │
//! │   │   "B"    │  v2  │          │  ↑              ↑       │                  │
//! │   │   "C"    │  v3  │          │ old          newest     │                  │
//! │   │   "D"    │  v4  │          │ keep         EVICT      │                  │
//! │   └──────────┴──────┘          └─────────────────────────┘                  │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow (new key)
//! ──────────────────────
//!
//!   put("new_key", value):
//!     1. Check map - not found
//!     2. At capacity: pop top of stack, remove from map, notify
//!     3. Push key to top of stack
//!     4. Insert (key, value) into map
//!
//! Update Flow (existing key)
//! ──────────────────────────
//!
//!   put("existing_key", value):
//!     1. Replace value in map
//!     2. Stack untouched - position is fixed at first insertion
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time   | Notes                                |
//! |---------------|--------|--------------------------------------|
//! | `get`         | O(1)   | map lookup, no reordering            |
//! | `put`         | O(1)*  | *amortized, may pop the top          |
//! | `peek_newest` | O(1)   | next victim                          |
//! | `show`        | O(n)   | bottom (oldest) → top (newest)       |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lifo::LifoCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LifoCache::new(3);
//! cache.put(1, 100);
//! cache.put(2, 200);
//! cache.put(3, 300);
//!
//! // When the cache is full, the most recent insertion is the victim
//! cache.put(4, 400);
//! assert!(!cache.contains(&3));
//! assert!(cache.contains(&1));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ConfigError, InvariantError, validate_capacity};
use crate::listener::{DiscardHook, EvictionListener};
#[cfg(feature = "metrics")]
use crate::metrics::{CoreMetrics, CoreMetricsRecorder, CoreMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::{CoreCache, MAX_ITEMS};

/// Bounded cache evicting the newest insertion.
///
/// # Example
///
/// ```
/// use evictkit::policy::lifo::LifoCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LifoCache::new(100);
/// cache.put("key1", "value1");
///
/// // Update existing key (no stack change)
/// cache.put("key1", "new_value");
/// assert_eq!(cache.get(&"key1"), Some(&"new_value"));
/// ```
pub struct LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Maps key to value
    map: FxHashMap<K, V>,
    /// Keys in insertion order (top = most recent)
    stack: Vec<K>,
    capacity: usize,
    hook: DiscardHook<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a LIFO cache with the specified capacity.
    ///
    /// ```
    /// use evictkit::policy::lifo::LifoCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let cache: LifoCache<String, i32> = LifoCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            stack: Vec::with_capacity(capacity),
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

    /// The entry on top of the stack, i.e. the next victim.
    pub fn peek_newest(&self) -> Option<(&K, &V)> {
        let key = self.stack.last()?;
        self.map.get(key).map(|value| (key, value))
    }

    /// Pops from the top of the stack (most recent insertion).
    fn evict_newest(&mut self) {
        let Some(key) = self.stack.pop() else {
            return;
        };
        if let Some(value) = self.map.remove(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.hook.notify("lifo", &key, &value);
        }
    }

    /// Checks that:
    /// - the map fits in capacity
    /// - map size matches stack size
    /// - every stacked key is live and appears once
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lifo holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.map.len() != self.stack.len() {
            return Err(InvariantError::new("lifo map and stack have different sizes"));
        }
        let mut seen = FxHashSet::default();
        for key in &self.stack {
            if !self.map.contains_key(key) {
                return Err(InvariantError::new("lifo stack holds a key missing from the map"));
            }
            if !seen.insert(key) {
                return Err(InvariantError::new("lifo stack holds a duplicate key"));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("LifoCache invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return;
        }

        // Existing key: update in place, stack untouched
        if let Some(slot) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            *slot = value;
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            self.evict_newest();
        }
        self.stack.push(key.clone());
        self.map.insert(key, value);

        #[cfg(debug_assertions)]
        self.debug_validate();
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.map.get(key);
        #[cfg(feature = "metrics")]
        match value {
            Some(_) => self.metrics.record_get_hit(),
            None => self.metrics.record_get_miss(),
        }
        value
    }

    /// Bottom of the stack first.
    fn show(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.stack
            .iter()
            .filter_map(|key| self.map.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
        self.stack.clear();
    }
}

impl<K, V> Default for LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(MAX_ITEMS)
    }
}

impl<K, V> fmt::Debug for LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("stack_len", &self.stack.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for LifoCache<K, V>
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
            let cache: LifoCache<&str, i32> = LifoCache::new(100);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 100);
        }

        #[test]
        fn insert_multiple_items() {
            let mut cache = LifoCache::new(100);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.put("c", 3);

            assert_eq!(cache.len(), 3);
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"c"), Some(&3));
            assert_eq!(cache.get(&"missing"), None);
        }

        #[test]
        fn update_existing_key() {
            let mut cache = LifoCache::new(100);
            cache.put("key", "initial");
            cache.put("key", "updated");

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"key"), Some(&"updated"));
        }

        #[test]
        fn absent_input_is_ignored() {
            let mut cache = LifoCache::new(2);
            cache.put("a", 1);
            cache.put_opt(None, Some(2));
            cache.put_opt(Some("b"), None);
            assert_eq!(cache.show(), vec![("a", 1)]);
        }

        #[test]
        fn clear_removes_all_entries() {
            let mut cache = LifoCache::new(100);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.clear();

            assert!(cache.is_empty());
            assert!(!cache.contains(&"a"));
            assert!(cache.check_invariants().is_ok());
        }
    }

    // ==============================================
    // LIFO-Specific Behavior (Evict Most Recent)
    // ==============================================

    mod lifo_behavior {
        use super::*;

        #[test]
        fn fifth_key_evicts_fourth() {
            let (log, listener) = discard_log::<&str, i32>();
            let mut cache = LifoCache::with_listener(4, listener);
            for (k, v) in [("A", 1), ("B", 2), ("C", 3), ("D", 4)] {
                cache.put(k, v);
            }

            cache.put("E", 5);
            assert_eq!(discarded(&log), vec!["D"]);
            assert_eq!(cache.show(), vec![("A", 1), ("B", 2), ("C", 3), ("E", 5)]);

            // E is now the newest surviving insertion
            cache.put("F", 6);
            assert_eq!(discarded(&log), vec!["D", "E"]);
        }

        #[test]
        fn opposite_of_fifo_behavior() {
            let mut cache = LifoCache::new(3);
            cache.put("oldest", 1);
            cache.put("middle", 2);
            cache.put("newest", 3);
            cache.put("new", 4);

            assert!(cache.contains(&"oldest"), "Oldest should stay in LIFO");
            assert!(!cache.contains(&"newest"), "Newest should be evicted in LIFO");
            assert!(cache.contains(&"new"));
        }

        #[test]
        fn get_does_not_change_eviction_order() {
            let mut cache = LifoCache::new(3);
            cache.put(1, 10);
            cache.put(2, 20);
            cache.put(3, 30);
            for _ in 0..100 {
                cache.get(&1);
            }
            cache.put(4, 40);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&3));
        }

        #[test]
        fn update_preserves_stack_position() {
            let mut cache = LifoCache::new(3);
            cache.put(1, 10);
            cache.put(2, 20);
            cache.put(3, 30);

            // Updating the oldest must not put it on top
            cache.put(1, 100);
            assert_eq!(cache.peek_newest(), Some((&3, &30)));

            cache.put(4, 40);
            assert!(cache.contains(&1), "Updated item should preserve position");
            assert!(!cache.contains(&3), "Most recent insert still evicted");
            assert_eq!(cache.get(&1), Some(&100));
        }

        #[test]
        fn oldest_items_survive() {
            let mut cache = LifoCache::new(3);
            for i in 1..=10 {
                cache.put(i, i * 10);
            }
            assert_eq!(cache.show(), vec![(1, 10), (2, 20), (10, 100)]);
        }
    }

    // ==============================================
    // Edge Cases
    // ==============================================

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_cache() {
            let mut cache = LifoCache::new(1);
            cache.put("a", 1);
            cache.put("b", 2);
            assert!(!cache.contains(&"a"));
            assert_eq!(cache.get(&"b"), Some(&2));
        }

        #[test]
        fn zero_capacity_cache() {
            let mut cache = LifoCache::new(0);
            cache.put("a", 1);
            assert_eq!(cache.len(), 0);
            assert!(LifoCache::<&str, i32>::try_new(0).is_err());
        }

        #[test]
        fn default_is_bounded_by_max_items() {
            let mut cache = LifoCache::default();
            for i in 0..10u32 {
                cache.put(i, ());
            }
            assert_eq!(cache.len(), MAX_ITEMS);
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn eviction_is_counted() {
            let mut cache = LifoCache::new(2);
            for i in 0..5 {
                cache.put(i, i);
            }
            let snap = cache.metrics_snapshot();
            assert_eq!(snap.evicted_entries, 3);
            assert_eq!(snap.capacity, 2);
        }
    }
}
