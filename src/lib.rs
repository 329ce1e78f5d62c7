//! Dual Timer - two independent second counters
//! 
//! This library provides the timer core (tick source and start/stop/reset
//! state machine), the per-timer event loops that drive it, and an HTTP
//! display surface for rendering values and raising intents.

pub mod config;
pub mod error;
pub mod state;
pub mod timer;
pub mod tasks;
pub mod surface;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::SurfaceError;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
