//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the LRU cache against a reference model and the
//! range cache against direct recomputation.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::LruCache;
use crate::range::{ArrayStore, RangeKey, RangeQueryCache};

// == Test Configuration ==
const KEY_SPACE: u8 = 16;
const ARRAY_LEN: usize = 24;

// == Strategies ==
#[derive(Debug, Clone)]
enum LruOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Delete { key: u8 },
}

fn lru_op_strategy() -> impl Strategy<Value = LruOp> {
    prop_oneof![
        3 => (0..KEY_SPACE, any::<u32>()).prop_map(|(key, value)| LruOp::Put { key, value }),
        2 => (0..KEY_SPACE).prop_map(|key| LruOp::Get { key }),
        1 => (0..KEY_SPACE).prop_map(|key| LruOp::Delete { key }),
    ]
}

#[derive(Debug, Clone)]
enum RangeOp {
    Range { left: usize, right: usize },
    Update { index: usize, value: i64 },
}

fn range_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0..ARRAY_LEN, 0..ARRAY_LEN).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

fn range_op_strategy() -> impl Strategy<Value = RangeOp> {
    prop_oneof![
        4 => range_strategy().prop_map(|(left, right)| RangeOp::Range { left, right }),
        1 => (0..ARRAY_LEN, -1_000i64..1_000).prop_map(|(index, value)| RangeOp::Update { index, value }),
    ]
}

fn array_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, ARRAY_LEN)
}

/// Reference LRU: keys ordered most recent first.
#[derive(Default)]
struct ModelLru {
    order: Vec<u8>,
    values: HashMap<u8, u32>,
}

impl ModelLru {
    fn touch(&mut self, key: u8) {
        self.order.retain(|&k| k != key);
        self.order.insert(0, key);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any sequence of operations the cache matches a reference LRU model:
    // same values, same recency order, same eviction victim, never above capacity.
    #[test]
    fn prop_lru_matches_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(lru_op_strategy(), 1..120)
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        let mut model = ModelLru::default();

        for op in ops {
            match op {
                LruOp::Put { key, value } => {
                    let expected_victim = if !model.values.contains_key(&key)
                        && model.order.len() >= capacity
                    {
                        model.order.pop()
                    } else {
                        None
                    };
                    if let Some(victim) = expected_victim {
                        model.values.remove(&victim);
                    }
                    model.values.insert(key, value);
                    model.touch(key);

                    let evicted = cache.put(key, value).map(|(k, _)| k);
                    prop_assert_eq!(evicted, expected_victim);
                    prop_assert_eq!(cache.most_recent(), Some(&key));
                }
                LruOp::Get { key } => {
                    let expected = model.values.get(&key).copied();
                    if expected.is_some() {
                        model.touch(key);
                    }
                    prop_assert_eq!(cache.get(&key).copied(), expected);
                    if expected.is_some() {
                        prop_assert_eq!(cache.most_recent(), Some(&key));
                    }
                }
                LruOp::Delete { key } => {
                    let expected = model.values.remove(&key);
                    model.order.retain(|&k| k != key);
                    prop_assert_eq!(cache.delete(&key), expected);
                }
            }

            prop_assert!(cache.len() <= capacity, "size {} over capacity {}", cache.len(), capacity);
            prop_assert_eq!(cache.recency_order(), model.order.clone());
        }
    }

    // For any interleaving of reads and writes, every range read equals a
    // direct recomputation over the current array.
    #[test]
    fn prop_range_query_matches_direct_sum(
        cells in array_strategy(),
        capacity in 1usize..12,
        ops in prop::collection::vec(range_op_strategy(), 1..150)
    ) {
        let mut store = ArrayStore::new(cells);
        let mut cache = RangeQueryCache::new(capacity).unwrap();

        for op in ops {
            match op {
                RangeOp::Range { left, right } => {
                    let cached = cache.range_query(&store, left, right).unwrap();
                    let direct: i64 = store.as_slice()[left..=right].iter().sum();
                    prop_assert_eq!(cached, direct);
                }
                RangeOp::Update { index, value } => {
                    cache.update(&mut store, index, value).unwrap();
                }
            }
            prop_assert!(cache.len() <= capacity);
        }
    }

    // After an update, overlapping ranges are gone and every other cached
    // range keeps its previous value.
    #[test]
    fn prop_update_invalidates_exactly_overlapping(
        cells in array_strategy(),
        ranges in prop::collection::vec(range_strategy(), 1..20),
        index in 0..ARRAY_LEN,
        value in -1_000i64..1_000
    ) {
        let mut store = ArrayStore::new(cells);
        let mut cache = RangeQueryCache::new(64).unwrap();
        for &(left, right) in &ranges {
            cache.range_query(&store, left, right).unwrap();
        }

        let before: HashMap<RangeKey, i64> = cache
            .keys()
            .into_iter()
            .map(|k| (k, cache.cached(k.left, k.right).unwrap()))
            .collect();
        let overlapping = before.keys().filter(|k| k.contains(index)).count();

        let invalidated = cache.update(&mut store, index, value).unwrap();
        prop_assert_eq!(invalidated, overlapping);

        for (key, old) in before {
            let now = cache.cached(key.left, key.right);
            if key.left <= index && index <= key.right {
                prop_assert_eq!(now, None, "{:?} should be invalidated", key);
            } else {
                prop_assert_eq!(now, Some(old), "{:?} should survive", key);
            }
        }
    }

    // Two identical reads with no write in between return the same value and
    // the second one is a pure hit.
    #[test]
    fn prop_repeated_query_is_pure_hit(
        cells in array_strategy(),
        (left, right) in range_strategy()
    ) {
        let store = ArrayStore::new(cells);
        let mut cache = RangeQueryCache::new(4).unwrap();

        let first = cache.range_query(&store, left, right).unwrap();
        let keys_after_first = cache.keys();
        let misses = cache.stats().misses;

        let second = cache.range_query(&store, left, right).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(cache.keys(), keys_after_first);
        prop_assert_eq!(cache.stats().misses, misses);
        prop_assert_eq!(cache.stats().hits, 1);
    }
}

// == Concurrent Access ==
// The service shares the cache and array behind a single lock.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    // For any set of concurrent reads and writes through the shared engine,
    // the cache never holds a sum that disagrees with the array.
    #[test]
    fn prop_concurrent_engine_consistency(
        cells in array_strategy(),
        ops in prop::collection::vec(range_op_strategy(), 10..60)
    ) {
        use std::sync::Arc;
        use tokio::sync::RwLock;

        use crate::api::Engine;

        let engine = Arc::new(RwLock::new(Engine::new(
            RangeQueryCache::new(16).unwrap(),
            ArrayStore::new(cells),
        )));

        tokio_test::block_on(async {
            let mut handles = Vec::new();
            for op in ops {
                let engine = Arc::clone(&engine);
                handles.push(tokio::spawn(async move {
                    let mut guard = engine.write().await;
                    match op {
                        RangeOp::Range { left, right } => {
                            let sum = guard.range_query(left, right).unwrap();
                            let direct = guard.store.sum(left, right).unwrap();
                            assert_eq!(sum, direct);
                        }
                        RangeOp::Update { index, value } => {
                            guard.update(index, value).unwrap();
                        }
                    }
                }));
            }
            for handle in handles {
                handle.await.expect("task should not panic");
            }
        });

        let guard = tokio_test::block_on(engine.read());
        for key in guard.cache.keys() {
            let cached = guard.cache.cached(key.left, key.right).unwrap();
            prop_assert_eq!(cached, guard.store.sum(key.left, key.right).unwrap());
        }
    }
}
