use crate::metrics::snapshot::CoreMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// Plain counters; the owning cache is single-threaded so no atomics.
#[derive(Debug, Default, Clone)]
pub struct CoreMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub clears: u64,
}

impl CoreMetrics {
    /// Captures the counters plus the caller-supplied gauges.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CoreMetricsSnapshot {
        CoreMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evicted_entries: self.evicted_entries,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CoreMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_and_misses_both_count_as_gets() {
        let mut m = CoreMetrics::default();
        m.record_get_hit();
        m.record_get_hit();
        m.record_get_miss();

        let snap = m.snapshot(0, 4);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 2);
        assert_eq!(snap.get_misses, 1);
    }

    #[test]
    fn snapshot_carries_gauges() {
        let mut m = CoreMetrics::default();
        m.record_insert_call();
        m.record_insert_new();
        m.record_evicted_entry();

        let snap = m.snapshot(3, 4);
        assert_eq!(snap.insert_calls, 1);
        assert_eq!(snap.insert_new, 1);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.cache_len, 3);
        assert_eq!(snap.capacity, 4);
    }
}
