//! Range Cache - LRU-memoized range-sum queries over a mutable array
//!
//! Range sums are cached by `(left, right)` in a fixed-capacity LRU cache;
//! a point write drops every cached range that contains the written index.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod range;
pub mod replay;
pub mod tasks;
pub mod workload;

pub use api::AppState;
pub use config::Config;
pub use error::{CacheError, Result};
pub use range::{ArrayStore, RangeKey, RangeQueryCache};
pub use tasks::spawn_sweep_task;
