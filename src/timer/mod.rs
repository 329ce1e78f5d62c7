//! Timer core
//!
//! The tick source and the per-timer state machine. Nothing in here knows
//! about HTTP or any other presentation layer.

pub mod controller;
pub mod tick_source;

// Re-export main types
pub use controller::{Intent, TickPolicy, TimerController, ValueSink};
pub use tick_source::{Tick, TickSource, TICK_INTERVAL};
