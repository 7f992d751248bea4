//! Workload Module
//!
//! Generates skewed streams of range reads and point writes for replay.
//!
//! A fixed pool of "hot" ranges is drawn once; each read then picks from the
//! pool with probability `p_hot` or draws a uniform range otherwise. Writes
//! occur with probability `p_update`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Query ==
/// One tagged operation of a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Query {
    Range { left: usize, right: usize },
    Update { index: usize, value: i64 },
}

// == Workload Config ==
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    /// Length of the array the queries target
    pub array_len: usize,
    /// Number of operations to emit
    pub queries: usize,
    /// Size of the hot range pool
    pub hot_pool: usize,
    /// Probability that a read is drawn from the hot pool
    pub p_hot: f64,
    /// Probability that an operation is a write
    pub p_update: f64,
    /// Upper bound for written values (lower bound is 1)
    pub max_value: i64,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            array_len: 100_000,
            queries: 50_000,
            hot_pool: 30,
            p_hot: 0.95,
            p_update: 0.03,
            max_value: 100,
            seed: 7,
        }
    }
}

impl WorkloadConfig {
    /// Fails with `InvalidRequest` if the configuration cannot produce queries.
    pub fn validate(&self) -> Result<()> {
        if self.array_len == 0 {
            return Err(CacheError::InvalidRequest(
                "workload array length must be positive".to_string(),
            ));
        }
        for (name, p) in [("p_hot", self.p_hot), ("p_update", self.p_update)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CacheError::InvalidRequest(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.max_value < 1 {
            return Err(CacheError::InvalidRequest(
                "max_value must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// == Generator ==
/// Builds the full query list described by `config`.
pub fn generate(config: &WorkloadConfig) -> Result<Vec<Query>> {
    config.validate()?;

    let n = config.array_len;
    let mid = n / 2;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let hot: Vec<(usize, usize)> = (0..config.hot_pool)
        .map(|_| (rng.gen_range(0..=mid), rng.gen_range(mid..n)))
        .collect();

    let mut queries = Vec::with_capacity(config.queries);
    for _ in 0..config.queries {
        if rng.gen_bool(config.p_update) {
            queries.push(Query::Update {
                index: rng.gen_range(0..n),
                value: rng.gen_range(1..=config.max_value),
            });
            continue;
        }

        let (left, right) = if !hot.is_empty() && rng.gen_bool(config.p_hot) {
            hot[rng.gen_range(0..hot.len())]
        } else {
            let left = rng.gen_range(0..n);
            (left, rng.gen_range(left..n))
        };
        queries.push(Query::Range { left, right });
    }

    Ok(queries)
}
