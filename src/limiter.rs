//! Sliding Window Rate Limiter
//!
//! Per-identity request throttling over a fixed time window. Each identity
//! keeps the timestamps of its accepted requests; entries older than the
//! window are pruned on every check.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{CacheError, Result};

// == Sliding Window Limiter ==
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    window: Duration,
    max_requests: usize,
    requests: HashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    // == Constructor ==
    /// Allows `max_requests` per identity within any `window`.
    ///
    /// # Errors
    /// `InvalidRequest` for a zero window or a zero request budget.
    pub fn new(window: Duration, max_requests: usize) -> Result<Self> {
        if window.is_zero() {
            return Err(CacheError::InvalidRequest(
                "rate limit window must be positive".to_string(),
            ));
        }
        if max_requests == 0 {
            return Err(CacheError::InvalidRequest(
                "rate limit must allow at least one request".to_string(),
            ));
        }
        Ok(Self {
            window,
            max_requests,
            requests: HashMap::new(),
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    // == Try Acquire ==
    /// Records a request for `identity` if its window has room.
    pub fn try_acquire(&mut self, identity: &str) -> bool {
        self.try_acquire_at(identity, Instant::now())
    }

    pub fn try_acquire_at(&mut self, identity: &str, now: Instant) -> bool {
        let window = self.window;
        let max_requests = self.max_requests;
        let timestamps = self.requests.entry(identity.to_string()).or_default();
        prune(timestamps, window, now);

        if timestamps.len() < max_requests {
            timestamps.push_back(now);
            true
        } else {
            debug!(identity, "request rejected by rate limiter");
            false
        }
    }

    // == Time Until Allowed ==
    /// How long `identity` must wait before its next request is accepted.
    pub fn time_until_allowed(&mut self, identity: &str) -> Duration {
        self.time_until_allowed_at(identity, Instant::now())
    }

    pub fn time_until_allowed_at(&mut self, identity: &str, now: Instant) -> Duration {
        let Some(timestamps) = self.requests.get_mut(identity) else {
            return Duration::ZERO;
        };
        prune(timestamps, self.window, now);

        if timestamps.len() < self.max_requests {
            return Duration::ZERO;
        }
        match timestamps.front() {
            Some(&oldest) => self
                .window
                .saturating_sub(now.saturating_duration_since(oldest)),
            None => Duration::ZERO,
        }
    }

    // == Purge Idle ==
    /// Forgets identities with no requests left in their window.
    ///
    /// Returns how many identities were dropped.
    pub fn purge_idle(&mut self) -> usize {
        self.purge_idle_at(Instant::now())
    }

    pub fn purge_idle_at(&mut self, now: Instant) -> usize {
        let before = self.requests.len();
        let window = self.window;
        self.requests.retain(|_, timestamps| {
            prune(timestamps, window, now);
            !timestamps.is_empty()
        });
        before - self.requests.len()
    }

    pub fn tracked_identities(&self) -> usize {
        self.requests.len()
    }
}

/// Drops timestamps strictly older than `window` relative to `now`.
fn prune(timestamps: &mut VecDeque<Instant>, window: Duration, now: Instant) {
    while let Some(&oldest) = timestamps.front() {
        if now.saturating_duration_since(oldest) > window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}
