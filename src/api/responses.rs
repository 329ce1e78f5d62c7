//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Phase, TimerState},
    surface::{IntentOutcome, TimerPanel},
    timer::{Intent, TickPolicy},
};

/// What a display surface needs to render one timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub id: u8,
    pub title: String,
    pub policy: TickPolicy,
    pub phase: Phase,
    pub running: bool,
    pub value: u64,
    pub label: String,
}

impl TimerView {
    /// Render a panel from one state snapshot
    pub fn new(panel: &TimerPanel, state: TimerState) -> Self {
        Self {
            id: panel.id(),
            title: panel.title().to_string(),
            policy: panel.policy(),
            phase: state.phase,
            running: state.is_running(),
            value: state.value,
            label: state.value.to_string(),
        }
    }

    /// Render a panel from its latest published state
    pub fn current(panel: &TimerPanel) -> Self {
        Self::new(panel, panel.state())
    }
}

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize)]
pub struct IntentResponse {
    pub status: IntentOutcome,
    pub intent: Intent,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl IntentResponse {
    /// Create a new intent response
    pub fn new(status: IntentOutcome, intent: Intent, timer: TimerView) -> Self {
        let message = match status {
            IntentOutcome::Accepted => format!("{} {} accepted", timer.title, intent),
            IntentOutcome::Debounced => format!("{} {} ignored as a repeat", timer.title, intent),
        };

        Self {
            status,
            intent,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with both timers
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timers: Vec<TimerView>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
