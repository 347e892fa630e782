//! Content pipeline metrics.
//!
//! Counts namespace loads, cache behavior, recoverable failures and key
//! collisions. Exposed as a JSON report by the HTTP server.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global content metrics singleton.
pub struct ContentMetrics {
    /// Namespace documents read and parsed from disk
    namespace_loads: AtomicUsize,

    /// Lookups answered by the namespace cache
    cache_hits: AtomicUsize,

    /// Lookups that had to load from disk
    cache_misses: AtomicUsize,

    /// Namespaces replaced by an empty tree (missing or malformed)
    recovered_failures: AtomicUsize,

    /// Key collisions detected in validation mode
    collisions: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<ContentMetrics> = OnceLock::new();

/// Snapshot of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub namespace_loads: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub cache_hit_rate: f64,
    pub recovered_failures: usize,
    pub collisions: usize,
}

impl ContentMetrics {
    fn new() -> Self {
        Self {
            namespace_loads: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            recovered_failures: AtomicUsize::new(0),
            collisions: AtomicUsize::new(0),
        }
    }

    /// Get the global content metrics instance.
    pub fn global() -> &'static ContentMetrics {
        METRICS.get_or_init(ContentMetrics::new)
    }

    pub fn record_namespace_load(&self) {
        self.namespace_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_recovered_failure(&self) {
        self.recovered_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_collisions(&self, count: usize) {
        self.collisions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn namespace_loads(&self) -> usize {
        self.namespace_loads.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn recovered_failures(&self) -> usize {
        self.recovered_failures.load(Ordering::Relaxed)
    }

    pub fn collisions(&self) -> usize {
        self.collisions.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total = hits + misses;
        let cache_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            namespace_loads: self.namespace_loads(),
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            recovered_failures: self.recovered_failures(),
            collisions: self.collisions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Local instances: the global one is shared with every other test.

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ContentMetrics::new();
        let report = metrics.report();

        assert_eq!(report.namespace_loads, 0);
        assert_eq!(report.cache_hits, 0);
        assert_eq!(report.cache_misses, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
    }

    #[test]
    fn test_cache_hit_rate() {
        let metrics = ContentMetrics::new();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_cache_miss();

        let report = metrics.report();
        assert_eq!(report.cache_hits, 3);
        assert_eq!(report.cache_misses, 1);
        assert!((report.cache_hit_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failures_and_collisions() {
        let metrics = ContentMetrics::new();
        metrics.record_recovered_failure();
        metrics.record_collisions(2);
        metrics.record_collisions(0);

        assert_eq!(metrics.recovered_failures(), 1);
        assert_eq!(metrics.collisions(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ContentMetrics::new();
        metrics.record_namespace_load();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["namespace_loads"], 1);
        assert!(json.get("cache_hit_rate").is_some());
    }
}
