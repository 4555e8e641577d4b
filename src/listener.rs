//! Discard notifications.
//!
//! Every bounded cache fires exactly one notification per eviction, after the
//! victim has been removed from all internal structures and before the new
//! key is inserted. Hosts subscribe by installing an [`EvictionListener`];
//! any `FnMut(&K, &V) + Send` closure qualifies.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use evictkit::traits::CoreCache;
//! use evictkit::policy::fifo::FifoCache;
//!
//! let discarded = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&discarded);
//!
//! let mut cache = FifoCache::with_listener(1, move |key: &&str, _value: &i32| {
//!     sink.lock().unwrap().push(key.to_string());
//! });
//! cache.put("A", 1);
//! cache.put("B", 2);
//! assert_eq!(*discarded.lock().unwrap(), vec!["A".to_string()]);
//! ```
//!
//! [`DiscardLogger`] reproduces the classic `DISCARD: <key>` line through
//! `tracing` instead of writing to stdout.

use std::fmt;

/// Receives evicted entries.
pub trait EvictionListener<K, V>: Send {
    /// Called once per eviction with the victim's key and value.
    fn on_discard(&mut self, key: &K, value: &V);
}

impl<K, V, F> EvictionListener<K, V> for F
where
    F: FnMut(&K, &V) + Send,
{
    #[inline]
    fn on_discard(&mut self, key: &K, value: &V) {
        self(key, value)
    }
}

/// Logs `DISCARD: <key>` at `INFO` on the `evictkit::discard` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardLogger;

impl<K, V> EvictionListener<K, V> for DiscardLogger
where
    K: fmt::Display,
{
    fn on_discard(&mut self, key: &K, _value: &V) {
        tracing::info!(target: "evictkit::discard", "DISCARD: {}", key);
    }
}

/// Per-cache slot holding the optional listener.
pub(crate) struct DiscardHook<K, V> {
    listener: Option<Box<dyn EvictionListener<K, V>>>,
}

impl<K, V> DiscardHook<K, V> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self { listener: None }
    }

    pub(crate) fn with_listener(listener: impl EvictionListener<K, V> + 'static) -> Self {
        Self {
            listener: Some(Box::new(listener)),
        }
    }

    pub(crate) fn set(&mut self, listener: impl EvictionListener<K, V> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub(crate) fn is_installed(&self) -> bool {
        self.listener.is_some()
    }

    /// Reports one eviction.
    #[inline]
    pub(crate) fn notify(&mut self, policy: &'static str, key: &K, value: &V) {
        tracing::debug!(policy, "evicted entry");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_discard(key, value);
        }
    }
}

impl<K, V> Default for DiscardHook<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for DiscardHook<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscardHook")
            .field("installed", &self.is_installed())
            .finish()
    }
}
