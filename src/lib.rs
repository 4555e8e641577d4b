//! evictkit: bounded in-memory key-value caches with pluggable replacement
//! policies (FIFO, LIFO, LRU, MRU, LFU) behind one [`CoreCache`] contract.
//!
//! Every bounded cache holds at most `capacity` entries (default
//! [`MAX_ITEMS`]). Inserting a new key into a full cache evicts exactly one
//! victim chosen by the policy and reports it through an optional
//! [`EvictionListener`]. [`DiscardLogger`] prints `DISCARD: <key>` through
//! `tracing`.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = LruCache::with_listener(2, DiscardLogger);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.get(&"A");
//! cache.put("C", 3); // DISCARD: B
//!
//! assert_eq!(cache.show(), vec![("C", 3), ("A", 1)]);
//! ```
//!
//! Optional features:
//! - `metrics`: per-cache hit/miss/eviction counters with snapshots.
//! - `concurrency`: [`concurrent::ConcurrentCache`], a mutex-guarded handle.

pub mod builder;
pub mod ds;
pub mod error;
pub mod listener;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "concurrency")]
pub mod concurrent;
#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::listener::{DiscardLogger, EvictionListener};
pub use crate::traits::{CoreCache, MAX_ITEMS};
