//! API Routes
//!
//! Configures the Axum router with all range cache endpoints.

use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, health_handler, keys_handler, range_handler, stats_handler, update_handler,
    AppState,
};
use super::rate_limit::rate_limit;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /range?left=&right=` - Inclusive range sum
/// - `PUT /update` - Overwrite one cell, invalidating overlapping ranges
/// - `GET /keys` - List cached ranges
/// - `DELETE /cache` - Drop every cached range
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint (not rate limited)
///
/// # Middleware
/// - Rate limiting per `x-client-id`
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limited = Router::new()
        .route("/range", get(range_handler))
        .route("/update", put(update_handler))
        .route("/keys", get(keys_handler))
        .route("/cache", delete(clear_handler))
        .route("/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(limited)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
