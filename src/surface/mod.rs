//! Display surface boundary
//!
//! Adapters between a presentation layer and the timer core: input
//! debouncing and per-timer panels.

pub mod debounce;
pub mod panel;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE, DEFAULT_DEBOUNCE_MS};
pub use panel::{IntentOutcome, TimerPanel};
