//! Cache Module
//!
//! Fixed-capacity LRU cache built from an arena-backed recency list and a
//! key-to-node lookup table.

mod lru;
mod recency;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use lru::LruCache;
pub use recency::{NodeRef, RecencyList};
pub use stats::CacheStats;
