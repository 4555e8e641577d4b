//! Unified cache builder for every replacement policy.
//!
//! Pick the policy at runtime (from an enum or a name) and get back one
//! [`Cache`] type that implements [`CoreCache`].
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let policy: CachePolicy = "lru".parse().unwrap();
//! let mut cache = CacheBuilder::new(2).build::<u64, String>(policy);
//! cache.put(1, "one".to_string());
//! cache.put(2, "two".to_string());
//! cache.get(&1);
//! cache.put(3, "three".to_string());
//!
//! assert!(!cache.contains(&2));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::{ConfigError, InvariantError, validate_capacity};
use crate::listener::EvictionListener;
#[cfg(feature = "metrics")]
use crate::metrics::{CoreMetricsSnapshot, MetricsSnapshotProvider};
use crate::policy::basic::BasicCache;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lifo::LifoCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::traits::{CoreCache, MAX_ITEMS};

/// Available replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Unbounded, never evicts. Ignores the builder's capacity.
    Basic,
    /// First In, First Out.
    Fifo,
    /// Last In, First Out.
    Lifo,
    /// Least Recently Used.
    Lru,
    /// Most Recently Used.
    Mru,
    /// Least Frequently Used, oldest access first on ties.
    Lfu,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 6] = [
        CachePolicy::Basic,
        CachePolicy::Fifo,
        CachePolicy::Lifo,
        CachePolicy::Lru,
        CachePolicy::Mru,
        CachePolicy::Lfu,
    ];

    /// Lowercase name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Basic => "basic",
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lifo => "lifo",
            CachePolicy::Lru => "lru",
            CachePolicy::Mru => "mru",
            CachePolicy::Lfu => "lfu",
        }
    }

    /// Whether the policy enforces a capacity.
    pub fn is_bounded(self) -> bool {
        !matches!(self, CachePolicy::Basic)
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::new(format!("unknown cache policy: {wanted:?}")))
    }
}

/// Cache of any policy behind one type.
pub struct Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Clone + Eq + Hash,
{
    Basic(BasicCache<K, V>),
    Fifo(FifoCache<K, V>),
    Lifo(LifoCache<K, V>),
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

/// Expands `$body` once per variant with `$cache` bound to the inner cache.
macro_rules! dispatch {
    ($inner:expr, $cache:ident => $body:expr) => {
        match $inner {
            CacheInner::Basic($cache) => $body,
            CacheInner::Fifo($cache) => $body,
            CacheInner::Lifo($cache) => $body,
            CacheInner::Lru($cache) => $body,
            CacheInner::Mru($cache) => $body,
            CacheInner::Lfu($cache) => $body,
        }
    };
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Basic(_) => CachePolicy::Basic,
            CacheInner::Fifo(_) => CachePolicy::Fifo,
            CacheInner::Lifo(_) => CachePolicy::Lifo,
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Mru(_) => CachePolicy::Mru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Installs the eviction listener. A basic cache never evicts, so the
    /// listener is dropped unused.
    pub fn set_listener(&mut self, listener: impl EvictionListener<K, V> + 'static) {
        match &mut self.inner {
            CacheInner::Basic(_) => {},
            CacheInner::Fifo(cache) => cache.set_listener(listener),
            CacheInner::Lifo(cache) => cache.set_listener(listener),
            CacheInner::Lru(cache) => cache.set_listener(listener),
            CacheInner::Mru(cache) => cache.set_listener(listener),
            CacheInner::Lfu(cache) => cache.set_listener(listener),
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        dispatch!(&self.inner, cache => cache.check_invariants())
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn put(&mut self, key: K, value: V) {
        dispatch!(&mut self.inner, cache => cache.put(key, value))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(&mut self.inner, cache => cache.get(key))
    }

    fn show(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        dispatch!(&self.inner, cache => cache.show())
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(&self.inner, cache => cache.contains(key))
    }

    fn len(&self) -> usize {
        dispatch!(&self.inner, cache => cache.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(&self.inner, cache => cache.capacity())
    }

    fn clear(&mut self) {
        dispatch!(&mut self.inner, cache => cache.clear())
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CoreMetricsSnapshot> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CoreMetricsSnapshot {
        dispatch!(&self.inner, cache => cache.metrics_snapshot())
    }
}

/// Builder for cache instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a cache with the specified policy.
    ///
    /// A zero capacity yields a bounded cache that stores nothing; use
    /// [`try_build`](Self::try_build) to reject it instead.
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::traits::CoreCache;
    ///
    /// let cache = CacheBuilder::default().build::<&str, i32>(CachePolicy::Lfu);
    /// assert_eq!(cache.capacity(), 4);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match policy {
            CachePolicy::Basic => CacheInner::Basic(BasicCache::new()),
            CachePolicy::Fifo => CacheInner::Fifo(FifoCache::new(self.capacity)),
            CachePolicy::Lifo => CacheInner::Lifo(LifoCache::new(self.capacity)),
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Mru => CacheInner::Mru(MruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
        };
        tracing::debug!(policy = policy.name(), capacity = self.capacity, "built cache");
        Cache { inner }
    }

    /// Like [`build`](Self::build) but rejects a zero capacity for bounded policies.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        if policy.is_bounded() {
            validate_capacity(self.capacity)?;
        }
        Ok(self.build(policy))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new(MAX_ITEMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{discard_log, discarded};

    #[test]
    fn all_policies_basic_ops() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(10).build::<u64, String>(policy);

            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());

            assert_eq!(cache.get(&1), Some(&"one".to_string()), "{policy}");
            assert_eq!(cache.get(&3), None, "{policy}");
            assert!(cache.contains(&2));
            assert_eq!(cache.len(), 2);

            cache.put(1, "ONE".to_string());
            assert_eq!(cache.get(&1), Some(&"ONE".to_string()), "{policy}");
            assert_eq!(cache.len(), 2);
            assert!(cache.check_invariants().is_ok());

            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.policy(), policy);
        }
    }

    #[test]
    fn capacity_enforcement() {
        let mut cache = CacheBuilder::new(2).build::<u64, String>(CachePolicy::Lru);

        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(3, "three".to_string());

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn basic_policy_ignores_capacity() {
        let mut cache = CacheBuilder::new(1).build::<u32, u32>(CachePolicy::Basic);
        for i in 0..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 10);
        assert_eq!(cache.capacity(), usize::MAX);
    }

    #[test]
    fn set_listener_reaches_inner_cache() {
        let (log, listener) = discard_log::<&str, i32>();
        let mut cache = CacheBuilder::new(1).build::<&str, i32>(CachePolicy::Fifo);
        cache.set_listener(listener);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(discarded(&log), vec!["a"]);
    }

    #[test]
    fn parse_policy_names() {
        assert_eq!("fifo".parse::<CachePolicy>(), Ok(CachePolicy::Fifo));
        assert_eq!(" LRU ".parse::<CachePolicy>(), Ok(CachePolicy::Lru));
        assert_eq!("Lfu".parse::<CachePolicy>(), Ok(CachePolicy::Lfu));
        for policy in CachePolicy::ALL {
            assert_eq!(policy.to_string().parse::<CachePolicy>(), Ok(policy));
        }

        let err = "arc".parse::<CachePolicy>().unwrap_err();
        assert!(err.message().contains("arc"));
    }

    #[test]
    fn try_build_rejects_zero_capacity() {
        assert!(CacheBuilder::new(0).try_build::<u8, u8>(CachePolicy::Mru).is_err());
        assert!(CacheBuilder::new(0).try_build::<u8, u8>(CachePolicy::Basic).is_ok());
        assert!(CacheBuilder::new(3).try_build::<u8, u8>(CachePolicy::Lifo).is_ok());
    }

    #[test]
    fn default_builder_uses_max_items() {
        assert_eq!(CacheBuilder::default().capacity(), MAX_ITEMS);
        let cache = CacheBuilder::default().build::<u8, u8>(CachePolicy::Fifo);
        assert_eq!(cache.capacity(), MAX_ITEMS);
    }
}
