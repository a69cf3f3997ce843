//! Per-instance cache statistics.
//!
//! Counters live inside the cache instance and are mutated only while the
//! caller holds exclusive access to it, so plain integer fields are enough —
//! two caches never share a counter, and the concurrent wrapper updates them
//! under its mutex.
//!
//! The put-latency figure is a running average over new-entry insertions:
//! the first sample seeds the average, every later sample folds in as
//! `avg = (avg + sample) / 2`. Recent puts therefore dominate the figure,
//! which is the intended bias for an operator-facing health number.

use std::fmt;

/// Mutable statistics owned by one cache instance.
#[derive(Debug, Default)]
pub struct LfuStats {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub avg_put_latency_nanos: u64,
}

impl LfuStats {
    pub fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    pub fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    pub fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    pub fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    pub fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    /// Folds one new-entry put duration into the running average.
    pub fn record_put_latency(&mut self, nanos: u64) {
        if self.avg_put_latency_nanos == 0 {
            self.avg_put_latency_nanos = nanos;
        } else {
            self.avg_put_latency_nanos = (self.avg_put_latency_nanos + nanos) / 2;
        }
    }
}

/// Point-in-time copy of [`LfuStats`] plus size gauges.
///
/// `Display` renders the operator-facing statistics line:
///
/// ```
/// use lfukit::metrics::LfuStatsSnapshot;
///
/// let snapshot = LfuStatsSnapshot {
///     evicted_entries: 3,
///     avg_put_latency_nanos: 1200,
///     ..Default::default()
/// };
/// assert_eq!(
///     snapshot.to_string(),
///     "evictions = 3; average new-entry put latency = 1200 ns"
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LfuStatsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub avg_put_latency_nanos: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl fmt::Display for LfuStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "evictions = {}; average new-entry put latency = {} ns",
            self.evicted_entries, self.avg_put_latency_nanos
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_latency_sample_seeds_average() {
        let mut stats = LfuStats::default();
        stats.record_put_latency(900);
        assert_eq!(stats.avg_put_latency_nanos, 900);
    }

    #[test]
    fn later_samples_fold_halfway() {
        let mut stats = LfuStats::default();
        stats.record_put_latency(1000);
        stats.record_put_latency(500);
        assert_eq!(stats.avg_put_latency_nanos, 750);
        stats.record_put_latency(250);
        assert_eq!(stats.avg_put_latency_nanos, 500);
    }

    #[test]
    fn counters_accumulate_independently() {
        let mut stats = LfuStats::default();
        stats.record_get_hit();
        stats.record_get_miss();
        stats.record_get_miss();
        stats.record_insert_new();
        stats.record_insert_update();
        stats.record_evict_call();
        stats.record_evicted_entry();
        stats.record_evicted_entry();

        assert_eq!(stats.get_hits, 1);
        assert_eq!(stats.get_misses, 2);
        assert_eq!(stats.insert_new, 1);
        assert_eq!(stats.insert_updates, 1);
        assert_eq!(stats.evict_calls, 1);
        assert_eq!(stats.evicted_entries, 2);
    }

    #[test]
    fn snapshot_display_reports_both_figures() {
        let snapshot = LfuStatsSnapshot {
            evicted_entries: 7,
            avg_put_latency_nanos: 42,
            ..Default::default()
        };
        let line = snapshot.to_string();
        assert!(line.contains("evictions = 7"));
        assert!(line.contains("42 ns"));
    }
}
