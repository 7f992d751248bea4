//! Request DTOs for the range cache API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

/// Query parameters for a range read (GET /range)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeParams {
    /// Inclusive left index
    pub left: usize,
    /// Inclusive right index
    pub right: usize,
}

/// Request body for a point write (PUT /update)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateRequest {
    /// Index of the cell to overwrite
    pub index: usize,
    /// New cell value
    pub value: i64,
}
