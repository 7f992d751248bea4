//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::workload::WorkloadConfig;

/// Service and replay configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of ranges the cache can hold
    pub cache_capacity: usize,
    /// Length of the served array
    pub array_len: usize,
    /// Seed for the served array contents
    pub array_seed: u64,
    /// Upper bound for generated cell values (lower bound is 1)
    pub cell_max_value: i64,
    /// HTTP server port
    pub server_port: u16,
    /// Rate limiter window in seconds
    pub rate_limit_window: u64,
    /// Requests allowed per client per window
    pub rate_limit_max: usize,
    /// Idle limiter sweep interval in seconds
    pub sweep_interval: u64,
    /// Number of operations the replay binary generates
    pub workload_queries: usize,
    /// Seed for the replay workload
    pub workload_seed: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached ranges (default: 1000)
    /// - `ARRAY_LEN` - Served array length (default: 100000)
    /// - `ARRAY_SEED` - Served array seed (default: 42)
    /// - `CELL_MAX_VALUE` - Largest generated cell value (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RATE_LIMIT_WINDOW` - Limiter window in seconds (default: 10)
    /// - `RATE_LIMIT_MAX` - Requests per client per window (default: 100)
    /// - `SWEEP_INTERVAL` - Limiter sweep frequency in seconds (default: 30)
    /// - `WORKLOAD_QUERIES` - Replay operation count (default: 50000)
    /// - `WORKLOAD_SEED` - Replay workload seed (default: 7)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            array_len: env_or("ARRAY_LEN", defaults.array_len),
            array_seed: env_or("ARRAY_SEED", defaults.array_seed),
            cell_max_value: env_or("CELL_MAX_VALUE", defaults.cell_max_value),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            rate_limit_window: env_or("RATE_LIMIT_WINDOW", defaults.rate_limit_window),
            rate_limit_max: env_or("RATE_LIMIT_MAX", defaults.rate_limit_max),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            workload_queries: env_or("WORKLOAD_QUERIES", defaults.workload_queries),
            workload_seed: env_or("WORKLOAD_SEED", defaults.workload_seed),
        }
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }

    /// Workload parameters for the replay binary.
    pub fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            array_len: self.array_len,
            queries: self.workload_queries,
            seed: self.workload_seed,
            max_value: self.cell_max_value,
            ..WorkloadConfig::default()
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            array_len: 100_000,
            array_seed: 42,
            cell_max_value: WorkloadConfig::default().max_value,
            server_port: 3000,
            rate_limit_window: 10,
            rate_limit_max: 100,
            sweep_interval: 30,
            workload_queries: 50_000,
            workload_seed: 7,
        }
    }
}
