//! State management module
//! 
//! This module contains the timer state and the application composition root.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{Phase, TimerState};
