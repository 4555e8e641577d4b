//! Optional per-cache counters (feature `metrics`).
//!
//! Recording is split from reading, as in the rest of the crate: every cache
//! owns a [`CoreMetrics`](metrics_impl::CoreMetrics) that it writes through
//! [`CoreMetricsRecorder`](traits::CoreMetricsRecorder), and callers read a
//! [`CoreMetricsSnapshot`](snapshot::CoreMetricsSnapshot) through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider) or the
//! inherent `metrics_snapshot()` method.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::CoreMetrics;
pub use snapshot::CoreMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
