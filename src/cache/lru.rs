//! LRU Cache Module
//!
//! Fixed-capacity associative cache with least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::cache::{CacheStats, NodeRef, RecencyList};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Bounded key-value cache combining a lookup table with a recency list.
///
/// The lookup table maps each key to the handle of its node in the list,
/// so both structures always hold the same key set.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to node handle
    lookup: HashMap<K, NodeRef>,
    /// Access order, head = most recently used
    list: RecencyList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CapacityMisconfigured` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::CapacityMisconfigured(capacity));
        }
        Ok(Self {
            lookup: HashMap::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Returns `None` on a miss. Both outcomes are counted in the stats.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.lookup.get(key).copied() {
            Some(node) => {
                self.stats.record_hit();
                self.list.move_to_front(node);
                self.list.value(node)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency or stats.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.lookup
            .get(key)
            .and_then(|&node| self.list.value(node))
    }

    // == Put ==
    /// Stores a value and marks its key most recently used.
    ///
    /// If the key already exists the value is overwritten. If the key is new
    /// and the cache is full, the least recently used entry is evicted first
    /// and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&node) = self.lookup.get(&key) {
            if let Some(slot) = self.list.value_mut(node) {
                *slot = value;
            }
            self.list.move_to_front(node);
            return None;
        }

        let mut evicted = None;
        if self.lookup.len() >= self.capacity {
            if let Some((old_key, old_value)) = self.list.remove_last() {
                self.lookup.remove(&old_key);
                self.stats.record_eviction();
                trace!(capacity = self.capacity, "evicted least recently used entry");
                evicted = Some((old_key, old_value));
            }
        }

        let node = self.list.push_front(key.clone(), value);
        self.lookup.insert(key, node);
        self.stats.set_total_entries(self.lookup.len());

        evicted
    }

    // == Delete ==
    /// Removes `key` if present and returns its value.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let node = self.lookup.remove(key)?;
        let (_, value) = self.list.remove(node)?;
        self.stats.set_total_entries(self.lookup.len());
        Some(value)
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.list.clear();
        self.stats.set_total_entries(0);
    }

    // == Keys ==
    /// Snapshot of the cached keys in no particular order.
    pub fn keys(&self) -> Vec<K> {
        self.lookup.keys().cloned().collect()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    /// Key that would survive longest: the most recently used one.
    pub fn most_recent(&self) -> Option<&K> {
        self.list.head().and_then(|node| self.list.key(node))
    }

    /// Next eviction candidate.
    pub fn least_recent(&self) -> Option<&K> {
        self.list.tail().and_then(|node| self.list.key(node))
    }

    /// Keys ordered from most to least recently used.
    pub fn recency_order(&self) -> Vec<K> {
        self.list.iter().map(|(k, _)| k.clone()).collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.lookup.len());
        stats
    }

    /// Zeroes the hit/miss/eviction counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
        self.stats.set_total_entries(self.lookup.len());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let result = LruCache::<&str, i32>::new(0);
        assert!(matches!(result, Err(CacheError::CapacityMisconfigured(0))));
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = LruCache::new(4).unwrap();

        cache.put("key1", 1);

        assert_eq!(cache.get(&"key1"), Some(&1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let mut cache = LruCache::<&str, i32>::new(4).unwrap();

        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_capacity_two_evicts_oldest() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        let evicted = cache.put("c", 3);

        assert_eq!(evicted, Some(("a", 1)));
        let mut keys = cache.keys();
        keys.sort();
        assert_eq!(keys, vec!["b", "c"]);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("key1", 1);
        cache.put("key2", 2);
        cache.put("key3", 3);

        cache.get(&"key1");
        cache.put("key4", 4);

        assert!(cache.contains(&"key1"));
        assert!(!cache.contains(&"key2"));
    }

    #[test]
    fn test_overwrite_moves_to_front() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.put("a", 10), None);

        assert_eq!(cache.most_recent(), Some(&"a"));
        assert_eq!(cache.least_recent(), Some(&"b"));
        assert_eq!(cache.peek(&"a"), Some(&10));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_peek_does_not_touch() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.peek(&"a");
        cache.put("c", 3);

        assert!(!cache.contains(&"a"));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_delete() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.delete(&"a"), Some(1));
        assert_eq!(cache.delete(&"a"), None);
        assert_eq!(cache.recency_order(), vec!["b"]);
    }

    #[test]
    fn test_clear_behaves_like_new() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.keys().is_empty());
        assert!(cache.most_recent().is_none());

        cache.put("c", 3);
        cache.put("d", 4);
        assert_eq!(cache.recency_order(), vec!["d", "c"]);
    }

    #[test]
    fn test_reset_stats() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"z");
        cache.reset_stats();

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.total_entries, 1);
    }
}
