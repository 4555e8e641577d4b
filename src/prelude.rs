pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentCache;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::listener::{DiscardLogger, EvictionListener};
#[cfg(feature = "metrics")]
pub use crate::metrics::{CoreMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::basic::BasicCache;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lifo::LifoCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::mru::MruCache;
pub use crate::traits::{CoreCache, MAX_ITEMS};
