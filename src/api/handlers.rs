//! API Handlers
//!
//! HTTP request handlers for each range cache endpoint.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::debug;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::limiter::SlidingWindowLimiter;
use crate::models::{
    ClearResponse, HealthResponse, KeysResponse, RangeParams, RangeResponse, StatsResponse,
    UpdateRequest, UpdateResponse,
};
use crate::range::{ArrayStore, RangeQueryCache};

/// The array and its range cache, always locked together.
///
/// Invalidation has to observe the same key set it deletes from, so the
/// pair lives behind one lock rather than two.
#[derive(Debug)]
pub struct Engine {
    pub cache: RangeQueryCache,
    pub store: ArrayStore,
}

impl Engine {
    pub fn new(cache: RangeQueryCache, store: ArrayStore) -> Self {
        Self { cache, store }
    }

    pub fn range_query(&mut self, left: usize, right: usize) -> Result<i64> {
        self.cache.range_query(&self.store, left, right)
    }

    pub fn update(&mut self, index: usize, value: i64) -> Result<usize> {
        self.cache.update(&mut self.store, index, value)
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache and array under a single lock
    pub engine: Arc<RwLock<Engine>>,
    /// Per-client request throttling
    pub limiter: Arc<Mutex<SlidingWindowLimiter>>,
}

impl AppState {
    /// Creates a new AppState from an engine and a limiter.
    pub fn new(engine: Engine, limiter: SlidingWindowLimiter) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            limiter: Arc::new(Mutex::new(limiter)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds a seeded random array of `array_len` cells with values in
    /// `1..=cell_max_value` and an empty cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = RangeQueryCache::new(config.cache_capacity)?;
        let store =
            ArrayStore::random(config.array_len, config.cell_max_value, config.array_seed)?;
        let limiter =
            SlidingWindowLimiter::new(config.rate_limit_window(), config.rate_limit_max)?;
        Ok(Self::new(Engine::new(cache, store), limiter))
    }
}

/// Handler for GET /range?left=..&right=..
pub async fn range_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<RangeParams>, QueryRejection>,
) -> Result<Json<RangeResponse>> {
    let Query(params) = params.map_err(|e| CacheError::InvalidRequest(e.body_text()))?;

    // Write lock: a hit still reorders the recency list
    let mut engine = state.engine.write().await;
    let sum = engine.range_query(params.left, params.right)?;

    Ok(Json(RangeResponse::new(params.left, params.right, sum)))
}

/// Handler for PUT /update
///
/// Writes one cell and drops every cached range containing it.
pub async fn update_handler(
    State(state): State<AppState>,
    req: std::result::Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>> {
    let Json(req) = req.map_err(|e| CacheError::InvalidRequest(e.body_text()))?;

    let mut engine = state.engine.write().await;
    let invalidated = engine.update(req.index, req.value)?;
    debug!(index = req.index, invalidated, "update applied");

    Ok(Json(UpdateResponse::new(req.index, req.value, invalidated)))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let engine = state.engine.read().await;
    Json(KeysResponse::new(engine.cache.keys()))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut engine = state.engine.write().await;
    let cleared = engine.cache.len();
    engine.cache.clear_cache();

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let engine = state.engine.read().await;
    let stats = engine.cache.stats();

    Json(StatsResponse::new(
        &stats,
        engine.cache.capacity(),
        engine.store.len(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
