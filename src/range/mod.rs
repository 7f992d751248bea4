//! Range Module
//!
//! Range-sum memoization over a caller-owned array, with write invalidation.

mod query;
mod store;

pub use query::{RangeKey, RangeQueryCache};
pub use store::ArrayStore;
