use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Collects runtime statistics about recommendation operations using
/// lock-free atomic counters.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    similarity_queries: AtomicU64,
    ranking_runs: AtomicU64,
    filter_runs: AtomicU64,
    total_similarity_time_ns: AtomicU64,
    total_ranking_time_ns: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_similarity_query(&self, duration_ns: u64) {
        self.similarity_queries.fetch_add(1, Ordering::Relaxed);
        self.total_similarity_time_ns
            .fetch_add(duration_ns, Ordering::Relaxed);
    }

    pub fn record_ranking_run(&self, duration_ns: u64) {
        self.ranking_runs.fetch_add(1, Ordering::Relaxed);
        self.total_ranking_time_ns
            .fetch_add(duration_ns, Ordering::Relaxed);
    }

    pub fn record_filter_run(&self) {
        self.filter_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let similarity_queries = self.similarity_queries.load(Ordering::Relaxed);
        let ranking_runs = self.ranking_runs.load(Ordering::Relaxed);
        let sim_ns = self.total_similarity_time_ns.load(Ordering::Relaxed);
        let rank_ns = self.total_ranking_time_ns.load(Ordering::Relaxed);

        MetricsSnapshot {
            similarity_queries,
            ranking_runs,
            filter_runs: self.filter_runs.load(Ordering::Relaxed),
            avg_similarity_time_us: if similarity_queries > 0 {
                sim_ns as f64 / similarity_queries as f64 / 1000.0
            } else {
                0.0
            },
            avg_ranking_time_us: if ranking_runs > 0 {
                rank_ns as f64 / ranking_runs as f64 / 1000.0
            } else {
                0.0
            },
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.similarity_queries.store(0, Ordering::Relaxed);
        self.ranking_runs.store(0, Ordering::Relaxed);
        self.filter_runs.store(0, Ordering::Relaxed);
        self.total_similarity_time_ns.store(0, Ordering::Relaxed);
        self.total_ranking_time_ns.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of recommendation metrics.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub similarity_queries: u64,
    pub ranking_runs: u64,
    pub filter_runs: u64,
    pub avg_similarity_time_us: f64,
    pub avg_ranking_time_us: f64,
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Similarity: {} (avg {:.2}us), Rankings: {} (avg {:.2}us), Filters: {}",
            self.similarity_queries,
            self.avg_similarity_time_us,
            self.ranking_runs,
            self.avg_ranking_time_us,
            self.filter_runs,
        )
    }
}

/// RAII timer for measuring operation durations.
pub(crate) struct OpTimer {
    start: Instant,
}

impl OpTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ns(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}
