//! Limiter Sweep Task
//!
//! Background task that periodically forgets clients whose rate limit window
//! has emptied, so the limiter does not grow with every client ever seen.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::limiter::SlidingWindowLimiter;

/// Spawns a background task that purges idle limiter identities.
///
/// # Arguments
/// * `limiter` - shared limiter also used by the rate limiting middleware
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(
    limiter: Arc<Mutex<SlidingWindowLimiter>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting limiter sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = limiter.lock().await;
                let removed = guard.purge_idle();
                (removed, guard.tracked_identities())
            };

            if removed > 0 {
                info!(
                    "Limiter sweep: removed {} idle clients, {} still tracked",
                    removed, remaining
                );
            } else {
                debug!("Limiter sweep: no idle clients found");
            }
        }
    })
}
