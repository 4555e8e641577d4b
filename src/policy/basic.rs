//! Unbounded cache with no replacement policy.
//!
//! Stores every key it is given and never evicts, so no listener is ever
//! called. Useful as a baseline and for hosts that bound size elsewhere.
//!
//! ```
//! use evictkit::policy::basic::BasicCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = BasicCache::new();
//! for i in 0..100 {
//!     cache.put(i, i * 2);
//! }
//! assert_eq!(cache.len(), 100);
//! assert_eq!(cache.get(&7), Some(&14));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{CoreMetrics, CoreMetricsRecorder, CoreMetricsSnapshot, MetricsSnapshotProvider};
use crate::traits::CoreCache;

/// Key-value store without a capacity limit. `show` keeps first-insertion order.
pub struct BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    map: FxHashMap<K, V>,
    order: Vec<K>,
    #[cfg(feature = "metrics")]
    metrics: CoreMetrics,
}

impl<K, V> BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            order: Vec::new(),
            #[cfg(feature = "metrics")]
            metrics: CoreMetrics::default(),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.order.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "basic order has {} keys, map has {}",
                self.order.len(),
                self.map.len()
            )));
        }
        if self.order.iter().any(|key| !self.map.contains_key(key)) {
            return Err(InvariantError::new("basic order holds a key missing from map"));
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(slot) = self.map.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            *slot = value;
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        self.order.push(key.clone());
        self.map.insert(key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let found = self.map.get(key);
        #[cfg(feature = "metrics")]
        if found.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        found
    }

    fn show(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.order
            .iter()
            .filter_map(|key| self.map.get(key).map(|v| (key.clone(), v.clone())))
            .collect()
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    /// Always `usize::MAX`.
    fn capacity(&self) -> usize {
        usize::MAX
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> Default for BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCache")
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics.snapshot(self.map.len(), usize::MAX)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for BasicCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}
