//! Thread-safe handle around any single-threaded cache.
//!
//! Every [`CoreCache`] operation mutates policy metadata (even `get` moves
//! recency or bumps counts), so the whole instance sits behind one
//! `parking_lot::Mutex`. Reads hand back clones; no reference outlives the
//! lock.
//!
//! ```
//! use std::thread;
//! use evictkit::concurrent::ConcurrentCache;
//! use evictkit::policy::lru::LruCache;
//!
//! let cache = ConcurrentCache::new(LruCache::new(4));
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || cache.put(t, t * 10))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 4);
//! assert_eq!(cache.get_cloned(&2), Some(20));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::CoreCache;

/// Cloneable, `Send + Sync` handle to a cache guarded by a mutex.
pub struct ConcurrentCache<C, K, V> {
    inner: Arc<Mutex<C>>,
    _marker: PhantomData<fn(K, V)>,
}

impl<C, K, V> Clone for ConcurrentCache<C, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<C, K, V> ConcurrentCache<C, K, V>
where
    C: CoreCache<K, V>,
{
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Looks up `key` (updating policy metadata) and clones the value out.
    pub fn get_cloned(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn show(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.lock().show()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access, for sequences that must be atomic.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<C, K, V> fmt::Debug for ConcurrentCache<C, K, V>
where
    C: CoreCache<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
