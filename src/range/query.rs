//! Range Query Cache Module
//!
//! Memoizes inclusive range sums over an [`ArrayStore`] and drops every
//! memoized range a point write lands inside.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CacheStats, LruCache};
use crate::error::Result;
use crate::range::ArrayStore;

// == Range Key ==
/// Inclusive `[left, right]` index pair identifying one cached sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RangeKey {
    pub left: usize,
    pub right: usize,
}

impl RangeKey {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Overlap predicate: `left <= index <= right`.
    pub fn contains(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }
}

// == Range Query Cache ==
/// LRU-bounded memo of range sums.
///
/// The array is never owned here; every call borrows it explicitly so the
/// cache and the array it describes stay independent values.
#[derive(Debug)]
pub struct RangeQueryCache {
    cache: LruCache<RangeKey, i64>,
    invalidations: u64,
}

impl RangeQueryCache {
    // == Constructor ==
    /// # Errors
    /// `CapacityMisconfigured` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            cache: LruCache::new(capacity)?,
            invalidations: 0,
        })
    }

    // == Range Query ==
    /// Returns `sum(store[left..=right])`, from cache when possible.
    ///
    /// On a miss the sum is computed from `store` and memoized under
    /// `(left, right)`. Bounds are checked before the cache is consulted.
    pub fn range_query(&mut self, store: &ArrayStore, left: usize, right: usize) -> Result<i64> {
        store.check_range(left, right)?;

        let key = RangeKey::new(left, right);
        if let Some(&sum) = self.cache.get(&key) {
            return Ok(sum);
        }

        let sum = store.sum(left, right)?;
        self.cache.put(key, sum);
        Ok(sum)
    }

    // == Update ==
    /// Writes `store[index] = value` and invalidates overlapping ranges.
    ///
    /// Returns how many cached ranges were dropped. Ranges that do not
    /// contain `index` keep their cached sums.
    pub fn update(&mut self, store: &mut ArrayStore, index: usize, value: i64) -> Result<usize> {
        store.set(index, value)?;

        let stale: Vec<RangeKey> = self
            .cache
            .keys()
            .into_iter()
            .filter(|key| key.contains(index))
            .collect();

        for key in &stale {
            self.cache.delete(key);
        }

        self.invalidations += stale.len() as u64;
        if !stale.is_empty() {
            debug!(index, invalidated = stale.len(), "invalidated overlapping ranges");
        }
        Ok(stale.len())
    }

    // == Clear ==
    /// Empties the cache, e.g. between independent runs.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Snapshot of the cached ranges, order unspecified.
    pub fn keys(&self) -> Vec<RangeKey> {
        self.cache.keys()
    }

    /// Cached sum for a range, without touching recency or stats.
    pub fn cached(&self, left: usize, right: usize) -> Option<i64> {
        self.cache.peek(&RangeKey::new(left, right)).copied()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.cache.stats();
        stats.invalidations = self.invalidations;
        stats
    }

    pub fn reset_stats(&mut self) {
        self.cache.reset_stats();
        self.invalidations = 0;
    }
}
