//! API Module
//!
//! HTTP handlers and routing for the range cache REST API.
//!
//! # Endpoints
//! - `GET /range?left=&right=` - Inclusive range sum
//! - `PUT /update` - Overwrite one cell
//! - `GET /keys` - List cached ranges
//! - `DELETE /cache` - Drop every cached range
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use handlers::*;
pub use rate_limit::{ANONYMOUS_CLIENT, CLIENT_ID_HEADER};
pub use routes::create_router;
