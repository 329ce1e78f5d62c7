//! Main application state: the composition root for both timers

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    error::SurfaceError,
    surface::{IntentOutcome, TimerPanel},
    timer::{Intent, TickPolicy},
};
use super::TimerState;

/// Owns both timer panels and the server metadata shown on /status
#[derive(Debug)]
pub struct AppState {
    /// Timer 1 is gated, timer 2 ticks in the background
    pub panels: Vec<TimerPanel>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last accepted intent
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create both timers and spawn their event loops.
    /// Must be called from within a tokio runtime.
    pub fn new(port: u16, host: String, debounce: Duration) -> Self {
        let panels = vec![
            TimerPanel::spawn(1, "Timer 1", TickPolicy::Gated, debounce),
            TimerPanel::spawn(2, "Timer 2", TickPolicy::AlwaysOn, debounce),
        ];

        for panel in &panels {
            info!("Created {} (id {}, {:?} ticks)", panel.title(), panel.id(), panel.policy());
        }

        Self {
            panels,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Look up a panel by its id
    pub fn panel(&self, id: u8) -> Result<&TimerPanel, SurfaceError> {
        self.panels
            .iter()
            .find(|panel| panel.id() == id)
            .ok_or(SurfaceError::UnknownTimer(id))
    }

    /// Route an intent to the panel with `id` and record it if it went through.
    /// Returns the panel that handled it along with the outcome and resulting state.
    pub async fn request(
        &self,
        id: u8,
        intent: Intent,
    ) -> Result<(&TimerPanel, IntentOutcome, TimerState), SurfaceError> {
        let panel = self.panel(id)?;
        let (outcome, state) = panel.request(intent).await?;

        if outcome == IntentOutcome::Accepted {
            self.record_action(format!("timer{}-{}", id, intent));
        }

        Ok((panel, outcome, state))
    }

    fn record_action(&self, action: String) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
