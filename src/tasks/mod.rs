//! Background tasks module
//!
//! This module contains the per-timer event loops that run alongside the HTTP server.

pub mod timer_task;

// Re-export main items
pub use timer_task::{spawn_timer, timer_task, IntentRequest, TimerHandle};
