//! # Least Recently Used (LRU) Cache
//!
//! Evicts the entry that has gone longest without a `put` or a successful
//! `get` when a new key arrives at capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, Entry<V>>                                          │   │
//!   │   │                                                                  │   │
//!   │   │  ┌─────────┬──────────────────────────┐                          │   │
//!   │   │  │   Key   │  Entry { node, value }   │                          │   │
//!   │   │  ├─────────┼──────────────────────────┤                          │   │
//!   │   │  │  "A"    │  node: id_1 ─────────────┼──────┐                   │   │
//!   │   │  │  "B"    │  node: id_2 ─────────────┼────┐ │                   │   │
//!   │   │  │  "C"    │  node: id_3 ─────────────┼──┐ │ │                   │   │
//!   │   │  └─────────┴──────────────────────────┘  │ │ │                   │   │
//!   │   └──────────────────────────────────────────┼─┼─┼───────────────────┘   │
//!   │                                              ▼ ▼ ▼                       │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  IntrusiveList<K> (recency order)                                │   │
//!   │   │                                                                  │   │
//!   │   │  head ──► [A] ◄──► [B] ◄──► [C] ◄── tail                         │   │
//!   │   │           MRU                LRU (EVICT)                         │   │
//!   │   └──────────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) with the cache full (capacity = 3):
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop [C] from tail, remove from map, notify DISCARD: C
//!     2. push [D] at head
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B) / put(B, v):
//!     1. find B's node through the map: O(1)
//!     2. move_to_front: O(1)
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                              |
//! |------------|------|------------------------------------|
//! | `get`      | O(1) | hit moves key to head              |
//! | `put`      | O(1) | update moves to head; may evict    |
//! | `peek_lru` | O(1) | next victim, no reordering         |
//! | `show`     | O(n) | most → least recently used         |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert!(!cache.contains(&"B"));
//! assert_eq!(cache.show(), vec![("C", 3), ("A", 1)]);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError, validate_capacity};
use crate::listener::{DiscardHook, EvictionListener};
#[cfg(feature = "metrics")]
use crate::metrics::{CoreMetrics, CoreMetricsRecorder, CoreMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::{CoreCache, MAX_ITEMS};

/// Map value: the stored value plus the key's node in the recency list.
#[derive(Debug)]
struct Entry<V> {
    node: SlotId,
    value: V,
}

/// Bounded cache evicting the least recently used entry.
pub struct LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, Entry<V>>,
    /// Head is most recently used.
    list: IntrusiveList<K>,
    capacity: usize,
    hook: DiscardHook<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
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

    /// The least recently used entry, without touching recency.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.list.back()?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }

    fn evict_lru(&mut self) {
        let Some(key) = self.list.pop_back() else {
            return;
        };
        if let Some(entry) = self.map.remove(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.hook.notify("lru", &key, &entry.value);
        }
    }

    /// Verifies capacity, list integrity, and that every map entry's node
    /// holds its own key (which with equal lengths rules out duplicates).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lru holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.list.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "lru list has {} nodes, map has {}",
                self.list.len(),
                self.map.len()
            )));
        }
        self.list.check_links().map_err(InvariantError::new)?;
        for (key, entry) in &self.map {
            if self.list.get(entry.node) != Some(key) {
                return Err(InvariantError::new("lru map entry points at a foreign node"));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("LruCache invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return;
        }

        if let Some(entry) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            entry.value = value;
            self.list.move_to_front(entry.node);
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            self.evict_lru();
        }
        let node = self.list.push_front(key.clone());
        self.map.insert(key, Entry { node, value });

        #[cfg(debug_assertions)]
        self.debug_validate();
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(entry) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.list.move_to_front(entry.node);
        Some(&entry.value)
    }

    /// Most recently used first.
    fn show(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.list
            .iter()
            .filter_map(|key| {
                self.map
                    .get(key)
                    .map(|entry| (key.clone(), entry.value.clone()))
            })
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
        self.list.clear();
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(MAX_ITEMS)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("hook", &self.hook)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
