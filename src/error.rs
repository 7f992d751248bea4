//! Error types for the range cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the range cache and its service surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Index or range outside the array bounds
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Bounded cache constructed with a non-positive capacity
    #[error("Capacity misconfigured: {0} (must be at least 1)")]
    CapacityMisconfigured(usize),

    /// Range sum does not fit in an i64
    #[error("Overflow: {0}")]
    Overflow(String),

    /// Invalid request or configuration data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client exceeded its request budget for the current window
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

impl CacheError {
    /// Builds an `OutOfRange` error for a single index.
    pub fn index(index: usize, len: usize) -> Self {
        CacheError::OutOfRange(format!("index {} outside array of length {}", index, len))
    }

    /// Builds an `OutOfRange` error for an inclusive range.
    pub fn range(left: usize, right: usize, len: usize) -> Self {
        CacheError::OutOfRange(format!(
            "range [{}, {}] invalid for array of length {}",
            left, right, len
        ))
    }

    /// Builds an `Overflow` error for a range whose sum leaves i64.
    pub fn overflow(left: usize, right: usize) -> Self {
        CacheError::Overflow(format!("sum of range [{}, {}] exceeds i64", left, right))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::OutOfRange(_) => StatusCode::BAD_REQUEST,
            CacheError::Overflow(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            CacheError::CapacityMisconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        let mut response = (status, body).into_response();
        if let CacheError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the range cache.
pub type Result<T> = std::result::Result<T, CacheError>;
