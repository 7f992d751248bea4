//! Rate Limiting Middleware
//!
//! Throttles each client through the shared sliding-window limiter. Clients
//! identify themselves with the `x-client-id` header.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::handlers::AppState;
use crate::error::{CacheError, Result};

/// Header carrying the client identity.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Identity used when a request carries no usable client id.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Rejects the request with `429` once its client has used up the window.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let identity = request
        .headers()
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string();

    {
        let mut limiter = state.limiter.lock().await;
        if !limiter.try_acquire(&identity) {
            let wait = limiter.time_until_allowed(&identity);
            // Round up so clients never retry too early
            let retry_after_secs = (wait.as_secs() + u64::from(wait.subsec_nanos() > 0)).max(1);
            warn!(client = %identity, retry_after_secs, "client rate limited");
            return Err(CacheError::RateLimited { retry_after_secs });
        }
    }

    Ok(next.run(request).await)
}
