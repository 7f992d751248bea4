//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Limiter sweep: forgets clients with an empty rate limit window

mod sweep;

pub use sweep::spawn_sweep_task;
