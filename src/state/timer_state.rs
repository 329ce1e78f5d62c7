//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Run phase of a single timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Never started, or reset. Value is always zero here.
    Idle,
    Running,
    /// Stopped after running; keeps its value.
    Paused,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Accumulated elapsed seconds for one timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub value: u64,
}

impl TimerState {
    /// Create an idle timer state at zero
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            value: 0,
        }
    }

    /// Check if ticks are currently being applied
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
