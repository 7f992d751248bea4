//! Replay Module
//!
//! Runs a workload against an array either directly or through the range
//! cache, so the two paths can be timed and cross-checked.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::range::{ArrayStore, RangeQueryCache};
use crate::workload::Query;

// == Replay Report ==
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Number of range reads executed
    pub ranges: usize,
    /// Number of point writes executed
    pub updates: usize,
    /// Wrapping sum of every range result
    pub checksum: i64,
    /// Wall time spent replaying
    pub elapsed: Duration,
    /// Cache statistics, only present for cached replays
    pub stats: Option<CacheStats>,
}

impl ReplayReport {
    fn new() -> Self {
        Self {
            ranges: 0,
            updates: 0,
            checksum: 0,
            elapsed: Duration::ZERO,
            stats: None,
        }
    }

    fn record_range(&mut self, sum: i64) {
        self.ranges += 1;
        self.checksum = self.checksum.wrapping_add(sum);
    }
}

// == Uncached Replay ==
/// Answers every read by summing the array directly.
pub fn replay_uncached(store: &mut ArrayStore, queries: &[Query]) -> Result<ReplayReport> {
    let mut report = ReplayReport::new();
    let started = Instant::now();

    for query in queries {
        match *query {
            Query::Range { left, right } => report.record_range(store.sum(left, right)?),
            Query::Update { index, value } => {
                store.set(index, value)?;
                report.updates += 1;
            }
        }
    }

    report.elapsed = started.elapsed();
    info!(
        ranges = report.ranges,
        updates = report.updates,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "uncached replay finished"
    );
    Ok(report)
}

// == Cached Replay ==
/// Answers every read through `cache`. The cache is cleared first.
pub fn replay_cached(
    cache: &mut RangeQueryCache,
    store: &mut ArrayStore,
    queries: &[Query],
) -> Result<ReplayReport> {
    cache.clear_cache();
    cache.reset_stats();

    let mut report = ReplayReport::new();
    let started = Instant::now();

    for query in queries {
        match *query {
            Query::Range { left, right } => {
                report.record_range(cache.range_query(store, left, right)?)
            }
            Query::Update { index, value } => {
                cache.update(store, index, value)?;
                report.updates += 1;
            }
        }
    }

    report.elapsed = started.elapsed();
    let stats = cache.stats();
    info!(
        ranges = report.ranges,
        updates = report.updates,
        elapsed_ms = report.elapsed.as_millis() as u64,
        hit_rate = stats.hit_rate(),
        invalidations = stats.invalidations,
        "cached replay finished"
    );
    report.stats = Some(stats);
    Ok(report)
}
