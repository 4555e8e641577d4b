//! MRU (Most Recently Used) cache replacement policy.
//!
//! Evicts the **most** recently used entry when a new key arrives at
//! capacity. The mirror image of [`LruCache`](crate::policy::lru::LruCache):
//! same map and recency list, eviction taken from the head instead of the
//! tail. Suits cyclic scans where the item just touched is the one least
//! likely to be needed again soon.
//!
//! ## Architecture
//!
//! ```text
//!   FxHashMap<K, Entry<V>> ──► IntrusiveList<K>
//!
//!   head ──► [C] ◄──► [B] ◄──► [A] ◄── tail
//!            MRU (EVICT)       LRU (keep)
//!
//!   put(D) at capacity:
//!     1. pop [C] from head, remove from map, notify DISCARD: C
//!     2. push [D] at head
//!   head ──► [D] ◄──► [B] ◄──► [A] ◄── tail
//! ```
//!
//! Every put (new or update) and every successful get moves the key to the
//! head, so the entry touched last is always the next victim.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = MruCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3);
//!
//! assert!(!cache.contains(&"A"));
//! assert!(cache.contains(&"B"));
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

#[derive(Debug)]
struct Entry<V> {
    node: SlotId,
    value: V,
}

/// Bounded cache evicting the most recently used entry.
pub struct MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, Entry<V>>,
    list: IntrusiveList<K>,
    capacity: usize,
    hook: DiscardHook<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
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

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        validate_capacity(capacity).map(Self::new)
    }

    pub fn with_listener(capacity: usize, listener: impl EvictionListener<K, V> + 'static) -> Self {
        let mut cache = Self::new(capacity);
        cache.hook = DiscardHook::with_listener(listener);
        cache
    }

    pub fn set_listener(&mut self, listener: impl EvictionListener<K, V> + 'static) {
        self.hook.set(listener);
    }

    /// The most recently used entry, which is also the next victim.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let key = self.list.front()?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }

    fn evict_mru(&mut self) {
        let Some(key) = self.list.pop_front() else {
            return;
        };
        if let Some(entry) = self.map.remove(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.hook.notify("mru", &key, &entry.value);
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "mru holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.list.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "mru list has {} nodes, map has {}",
                self.list.len(),
                self.map.len()
            )));
        }
        self.list.check_links().map_err(InvariantError::new)?;
        for (key, entry) in &self.map {
            if self.list.get(entry.node) != Some(key) {
                return Err(InvariantError::new("mru map entry points at a foreign node"));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("MruCache invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for MruCache<K, V>
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

        // Evict before linking the newcomer, otherwise it would be its own victim.
        if self.map.len() >= self.capacity {
            self.evict_mru();
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

    /// Most recently used (next victim) first.
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

impl<K, V> Default for MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(MAX_ITEMS)
    }
}

impl<K, V> fmt::Debug for MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("hook", &self.hook)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
