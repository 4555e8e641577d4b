//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the entry with the fewest accesses when a new key arrives at
//! capacity. Ties on the access count go to the entry whose last access is
//! oldest, so the victim is always unique.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                           LfuCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, Entry<V>>                                            │ │
//!   │   │                                                                    │ │
//!   │   │  ┌─────────┬──────────────────────────────────────────────┐        │ │
//!   │   │  │   Key   │  Entry { value, freq, last_used }            │        │ │
//!   │   │  ├─────────┼──────────────────────────────────────────────┤        │ │
//!   │   │  │  "A"    │  freq: 3, last_used: 7   ← hot               │        │ │
//!   │   │  │  "B"    │  freq: 1, last_used: 1   ← victim            │        │ │
//!   │   │  │  "C"    │  freq: 1, last_used: 5                       │        │ │
//!   │   │  └─────────┴──────────────────────────────────────────────┘        │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  BTreeMap<(freq, last_used), K>   (eviction priority)              │ │
//!   │   │                                                                    │ │
//!   │   │   (1, 1) → "B"   ◄── pop_first() evicts here                       │ │
//!   │   │   (1, 5) → "C"                                                     │ │
//!   │   │   (3, 7) → "A"                                                     │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   clock: u64   (logical time, bumped on every access)                    │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   get(&key) hit, or put(key, v) on an existing key:
//!     1. remove (freq, last_used) from the priority index
//!     2. freq += 1, last_used = clock, clock += 1
//!     3. reinsert (freq, last_used) → key
//!
//!   put(new_key, v) at capacity:
//!     1. pop_first() from the index → victim
//!     2. remove the victim from the map, notify DISCARD: victim
//!     3. insert new_key with freq = 1, last_used = clock, clock += 1
//! ```
//!
//! Logical timestamps are unique, so `(freq, last_used)` is a total order and
//! eviction never depends on hash iteration order.
//!
//! ## Operations
//!
//! | Operation        | Time     | Notes                                  |
//! |------------------|----------|----------------------------------------|
//! | `get`            | O(log n) | hit bumps frequency and timestamp      |
//! | `put`            | O(log n) | update counts as an access             |
//! | `peek_lfu`       | O(log n) | next victim                            |
//! | `frequency(&k)`  | O(1)     | access count, `None` if absent         |
//! | `last_access(&k)`| O(1)     | logical timestamp of the last access   |
//! | `show`           | O(n)     | next victim first                      |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.get(&"A");
//!
//! assert_eq!(cache.frequency(&"A"), Some(3));
//! assert_eq!(cache.frequency(&"B"), Some(1));
//!
//! cache.put("C", 3);
//! assert!(!cache.contains(&"B"));
//! ```
//!
//! ## Limitations
//!
//! Counts never decay. A key that was hot long ago keeps its rank until it is
//! evicted or the cache is cleared.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError, validate_capacity};
use crate::listener::{DiscardHook, EvictionListener};
#[cfg(feature = "metrics")]
use crate::metrics::{CoreMetrics, CoreMetricsRecorder, CoreMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::{CoreCache, MAX_ITEMS};

#[derive(Debug)]
struct Entry<V> {
    value: V,
    freq: u64,
    last_used: u64,
}

impl<V> Entry<V> {
    #[inline]
    fn rank(&self) -> (u64, u64) {
        (self.freq, self.last_used)
    }
}

/// Bounded cache evicting the least frequently used entry, oldest access
/// first on ties.
pub struct LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, Entry<V>>,
    queue: BTreeMap<(u64, u64), K>,
    clock: u64,
    capacity: usize,
    hook: DiscardHook<K, V>,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            queue: BTreeMap::new(),
            clock: 0,
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
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let (_, key) = self.queue.first_key_value()?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }

    /// Access count for `key`; a fresh insert starts at 1.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.map.get(key).map(|entry| entry.freq)
    }

    /// Logical time of the last access to `key`.
    pub fn last_access(&self, key: &K) -> Option<u64> {
        self.map.get(key).map(|entry| entry.last_used)
    }

    #[inline]
    fn tick(&mut self) -> u64 {
        let now = self.clock;
        self.clock += 1;
        now
    }

    /// Bumps count and timestamp for an existing key. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool {
        let Some(entry) = self.map.get_mut(key) else {
            return false;
        };
        let now = self.clock;
        self.clock += 1;
        let old_rank = entry.rank();
        entry.freq = entry.freq.saturating_add(1);
        entry.last_used = now;
        let new_rank = entry.rank();

        if let Some(k) = self.queue.remove(&old_rank) {
            self.queue.insert(new_rank, k);
        }
        true
    }

    fn evict_lfu(&mut self) {
        let Some((_, key)) = self.queue.pop_first() else {
            return;
        };
        if let Some(entry) = self.map.remove(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            self.hook.notify("lfu", &key, &entry.value);
        }
    }

    /// Verifies capacity, that the priority index mirrors the map exactly, and
    /// that no timestamp is ahead of the clock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "lfu holds {} entries, capacity is {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.queue.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "lfu index has {} ranks, map has {}",
                self.queue.len(),
                self.map.len()
            )));
        }
        for (key, entry) in &self.map {
            if entry.freq == 0 {
                return Err(InvariantError::new("lfu entry with zero frequency"));
            }
            if entry.last_used >= self.clock {
                return Err(InvariantError::new("lfu timestamp ahead of clock"));
            }
            if self.queue.get(&entry.rank()) != Some(key) {
                return Err(InvariantError::new("lfu index rank points at another key"));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("LfuCache invariant violated: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
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
            self.touch(&key);
            #[cfg(debug_assertions)]
            self.debug_validate();
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            self.evict_lfu();
        }
        let now = self.tick();
        self.queue.insert((1, now), key.clone());
        self.map.insert(
            key,
            Entry {
                value,
                freq: 1,
                last_used: now,
            },
        );

        #[cfg(debug_assertions)]
        self.debug_validate();
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.touch(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Eviction priority order: the next victim first.
    fn show(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.queue
            .values()
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
        self.queue.clear();
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(MAX_ITEMS)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("clock", &self.clock)
            .field("hook", &self.hook)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
