//! Response DTOs for the range cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::range::RangeKey;

/// Response body for a range read (GET /range)
#[derive(Debug, Clone, Serialize)]
pub struct RangeResponse {
    pub left: usize,
    pub right: usize,
    /// Inclusive sum of the range
    pub sum: i64,
}

impl RangeResponse {
    pub fn new(left: usize, right: usize, sum: i64) -> Self {
        Self { left, right, sum }
    }
}

/// Response body for a point write (PUT /update)
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub index: usize,
    pub value: i64,
    /// Number of cached ranges dropped by this write
    pub invalidated: usize,
}

impl UpdateResponse {
    pub fn new(index: usize, value: i64, invalidated: usize) -> Self {
        Self {
            index,
            value,
            invalidated,
        }
    }
}

/// Response body for the cached key listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Cached ranges sorted by (left, right)
    pub keys: Vec<RangeKey>,
    pub count: usize,
}

impl KeysResponse {
    /// Creates a KeysResponse, sorting keys for stable output
    pub fn new(mut keys: Vec<RangeKey>) -> Self {
        keys.sort();
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for a cache reset (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached ranges", cleared),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of ranges invalidated by writes
    pub invalidations: u64,
    /// Current number of cached ranges
    pub total_entries: usize,
    /// Maximum number of cached ranges
    pub capacity: usize,
    /// Length of the served array
    pub array_len: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, capacity: usize, array_len: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            capacity,
            array_len,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_response_serialize() {
        let resp = RangeResponse::new(0, 2, 16);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["sum"], 16);
        assert_eq!(json["left"], 0);
    }

    #[test]
    fn test_keys_response_sorted() {
        let resp = KeysResponse::new(vec![RangeKey::new(2, 3), RangeKey::new(0, 1)]);
        assert_eq!(resp.count, 2);
        assert_eq!(resp.keys[0], RangeKey::new(0, 1));

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#"{"left":0,"right":1}"#));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            invalidations: 3,
            total_entries: 10,
        };
        let resp = StatsResponse::new(&stats, 100, 4);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.invalidations, 3);
        assert_eq!(resp.array_len, 4);
    }

    #[test]
    fn test_clear_response_message() {
        let resp = ClearResponse::new(3);
        assert!(resp.message.contains('3'));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
