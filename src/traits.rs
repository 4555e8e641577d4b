//! # Cache Contract
//!
//! Every eviction policy in this crate implements the same small contract,
//! [`CoreCache`]. Nothing is inherited between policies: each type owns its
//! own map plus whatever metadata its policy needs, and only the shape of the
//! API is shared.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────────────────┐
//!                    │            CoreCache<K, V>              │
//!                    │                                         │
//!                    │  put(&mut, K, V)                        │
//!                    │  get(&mut, &K) → Option<&V>             │
//!                    │  show(&) → Vec<(K, V)>                  │
//!                    │  contains / len / capacity / clear      │
//!                    │                                         │
//!                    │  provided: put_opt, get_opt, render,    │
//!                    │            is_empty                     │
//!                    └──────────────────┬──────────────────────┘
//!                                       │
//!     ┌─────────┬───────────┬───────────┼───────────┬───────────┬─────────┐
//!     ▼         ▼           ▼           ▼           ▼           ▼         ▼
//!  Basic      Fifo        Lifo        Lru         Mru         Lfu     Cache
//!  (no        (oldest     (newest     (least      (most       (lowest  (builder
//!  eviction)  insert)     insert)     recent)     recent)     count)   wrapper)
//! ```
//!
//! ## Policy Comparison
//!
//! | Policy | Victim on overflow               | `get` updates metadata | Update moves key |
//! |--------|----------------------------------|------------------------|------------------|
//! | Basic  | never evicts                     | no                     | no               |
//! | FIFO   | oldest surviving insertion       | no                     | no               |
//! | LIFO   | newest surviving insertion       | no                     | no               |
//! | LRU    | least recently used              | yes                    | yes              |
//! | MRU    | most recently used               | yes                    | yes              |
//! | LFU    | lowest count, then oldest access | yes                    | yes              |
//!
//! ## Absent Input
//!
//! Rust has no null, so "absent" key or value is modelled with `Option`:
//! [`CoreCache::put_opt`] ignores the call unless both halves are present, and
//! [`CoreCache::get_opt`] answers `None` for an absent key. Neither is an
//! error.
//!
//! ## Thread Safety
//!
//! Caches are not internally synchronized. Wrap an instance in a single lock
//! (see `ConcurrentCache` behind the `concurrency` feature) to share it.

use std::fmt::{Display, Write};

/// Default bound on the number of live entries in a cache.
///
/// Inserting the `MAX_ITEMS + 1`-th distinct key triggers exactly one eviction.
pub const MAX_ITEMS: usize = 4;

/// Operations every cache supports, regardless of eviction policy.
///
/// # Example
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::fifo::FifoCache;
///
/// fn warm<C: CoreCache<&'static str, u32>>(cache: &mut C) {
///     cache.put("a", 1);
///     cache.put("b", 2);
/// }
///
/// let mut cache = FifoCache::new(4);
/// warm(&mut cache);
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates an entry.
    ///
    /// When the key is new and the cache is full, exactly one entry is evicted
    /// according to the policy (and the discard listener is notified) before
    /// the new key goes in. Updating an existing key never evicts.
    fn put(&mut self, key: K, value: V);

    /// Returns the value for `key`, or `None` on a miss.
    ///
    /// Never evicts. Recency- and frequency-based policies record the access
    /// on a hit; a miss leaves all state untouched.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns an owned snapshot of every live `(key, value)` pair.
    ///
    /// The order is documented per policy. No metadata is updated.
    fn show(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone;

    /// Returns `true` if `key` is live, without touching eviction metadata.
    fn contains(&self, key: &K) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries.
    fn capacity(&self) -> usize;

    /// Drops every entry and all policy metadata. Does not notify the listener.
    fn clear(&mut self);

    /// `put` for callers whose key or value may be absent.
    ///
    /// Does nothing unless both are `Some`.
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache: LruCache<&str, i32> = LruCache::new(4);
    /// cache.put_opt(None, Some(1));
    /// cache.put_opt(Some("a"), None);
    /// assert!(cache.is_empty());
    ///
    /// cache.put_opt(Some("a"), Some(1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn put_opt(&mut self, key: Option<K>, value: Option<V>) {
        if let (Some(key), Some(value)) = (key, value) {
            self.put(key, value);
        }
    }

    /// `get` for callers whose key may be absent; an absent key is a miss.
    fn get_opt(&mut self, key: Option<&K>) -> Option<&V> {
        self.get(key?)
    }

    /// Renders the [`show`](Self::show) listing for humans.
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(4);
    /// cache.put("A", "Hello");
    /// cache.put("B", "World");
    /// assert_eq!(cache.render(), "Current cache:\nA: Hello\nB: World\n");
    /// ```
    fn render(&self) -> String
    where
        K: Clone + Display,
        V: Clone + Display,
    {
        let mut out = String::from("Current cache:\n");
        for (key, value) in self.show() {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{key}: {value}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    /// Minimal unbounded cache used to exercise the provided methods.
    #[derive(Default)]
    struct MapCache {
        map: FxHashMap<u32, String>,
        order: Vec<u32>,
    }

    impl CoreCache<u32, String> for MapCache {
        fn put(&mut self, key: u32, value: String) {
            if self.map.insert(key, value).is_none() {
                self.order.push(key);
            }
        }

        fn get(&mut self, key: &u32) -> Option<&String> {
            self.map.get(key)
        }

        fn show(&self) -> Vec<(u32, String)> {
            self.order
                .iter()
                .map(|k| (*k, self.map[k].clone()))
                .collect()
        }

        fn contains(&self, key: &u32) -> bool {
            self.map.contains_key(key)
        }

        fn len(&self) -> usize {
            self.map.len()
        }

        fn capacity(&self) -> usize {
            usize::MAX
        }

        fn clear(&mut self) {
            self.map.clear();
            self.order.clear();
        }
    }

    #[test]
    fn max_items_default_is_four() {
        assert_eq!(MAX_ITEMS, 4);
    }

    #[test]
    fn put_opt_requires_both_halves() {
        let mut cache = MapCache::default();
        cache.put_opt(None, Some("x".to_string()));
        cache.put_opt(Some(1), None);
        cache.put_opt(None, None);
        assert!(cache.is_empty());

        cache.put_opt(Some(1), Some("x".to_string()));
        assert_eq!(cache.get(&1), Some(&"x".to_string()));
    }

    #[test]
    fn get_opt_with_absent_key_is_a_miss() {
        let mut cache = MapCache::default();
        cache.put(1, "x".to_string());
        assert_eq!(cache.get_opt(None), None);
        assert_eq!(cache.get_opt(Some(&1)), Some(&"x".to_string()));
        assert_eq!(cache.get_opt(Some(&2)), None);
    }

    #[test]
    fn render_lists_entries_in_show_order() {
        let mut cache = MapCache::default();
        assert_eq!(cache.render(), "Current cache:\n");

        cache.put(2, "two".to_string());
        cache.put(1, "one".to_string());
        assert_eq!(cache.render(), "Current cache:\n2: two\n1: one\n");
    }
}
