//! Recording and snapshot traits.

/// Counters shared by every policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Read-side access for tests, benches and host monitoring.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
