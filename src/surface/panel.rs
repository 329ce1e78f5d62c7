//! Display surface adapter for one timer
//!
//! A [`TimerPanel`] is what a presentation layer talks to: it renders the
//! label the controller pushes through its sink and forwards debounced
//! start/stop/reset intents to the timer task. The panel owns the task's
//! lifetime through its handle; the controller only holds a label sender.

use std::{sync::Mutex, time::Duration};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, trace};

use super::debounce::Debouncer;
use crate::{
    error::SurfaceError,
    state::TimerState,
    tasks::{spawn_timer, TimerHandle},
    timer::{Intent, TickPolicy, TimerController},
};

/// What happened to an intent raised on a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentOutcome {
    Accepted,
    Debounced,
}

#[derive(Debug)]
pub struct TimerPanel {
    id: u8,
    title: String,
    policy: TickPolicy,
    handle: TimerHandle,
    label: watch::Receiver<u64>,
    debouncer: Mutex<Debouncer>,
}

impl TimerPanel {
    /// Build the controller for this panel and spawn its event loop.
    /// Must be called from within a tokio runtime.
    pub fn spawn(id: u8, title: &str, policy: TickPolicy, debounce: Duration) -> Self {
        let (label_tx, label_rx) = watch::channel(0u64);
        let sink_title = title.to_string();
        let sink = move |value: u64| {
            trace!("{} label -> {}", sink_title, value);
            label_tx.send_replace(value);
        };

        let handle = spawn_timer(TimerController::new(title, policy, sink));

        Self {
            id,
            title: title.to_string(),
            policy,
            handle,
            label: label_rx,
            debouncer: Mutex::new(Debouncer::new(debounce)),
        }
    }

    pub async fn on_start_requested(&self) -> Result<(IntentOutcome, TimerState), SurfaceError> {
        self.request(Intent::Start).await
    }

    pub async fn on_stop_requested(&self) -> Result<(IntentOutcome, TimerState), SurfaceError> {
        self.request(Intent::Stop).await
    }

    pub async fn on_reset_requested(&self) -> Result<(IntentOutcome, TimerState), SurfaceError> {
        self.request(Intent::Reset).await
    }

    /// Debounce `intent` and, if it passes, forward it to the timer task.
    /// Returns the timer state after the intent was handled.
    pub async fn request(&self, intent: Intent) -> Result<(IntentOutcome, TimerState), SurfaceError> {
        let accepted = match self.debouncer.lock() {
            Ok(mut debouncer) => debouncer.accept(intent),
            Err(poisoned) => poisoned.into_inner().accept(intent),
        };

        if !accepted {
            debug!("{}: debounced {}", self.title, intent);
            return Ok((IntentOutcome::Debounced, self.handle.state()));
        }

        let state = self
            .handle
            .request(intent)
            .await
            .ok_or(SurfaceError::TimerUnavailable(self.id))?;

        Ok((IntentOutcome::Accepted, state))
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    /// Latest state published by the timer task
    pub fn state(&self) -> TimerState {
        self.handle.state()
    }

    /// Label text as last pushed by the controller
    pub fn label(&self) -> String {
        self.label.borrow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    use crate::state::Phase;

    fn panel(policy: TickPolicy) -> TimerPanel {
        TimerPanel::spawn(1, "Timer 1", policy, Duration::from_millis(200))
    }

    #[tokio::test(start_paused = true)]
    async fn label_follows_the_controller() {
        let panel = panel(TickPolicy::Gated);
        assert_eq!(panel.label(), "0");

        panel.on_start_requested().await.unwrap();
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(panel.label(), "3");

        panel.on_reset_requested().await.unwrap();
        assert_eq!(panel.label(), "0");
        assert_eq!(panel.state().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_repeat_is_debounced() {
        let panel = panel(TickPolicy::Gated);

        let (first, state) = panel.on_start_requested().await.unwrap();
        assert_eq!(first, IntentOutcome::Accepted);
        assert_eq!(state.phase, Phase::Running);

        sleep(Duration::from_millis(50)).await;
        let (second, _) = panel.on_start_requested().await.unwrap();
        assert_eq!(second, IntentOutcome::Debounced);

        sleep(Duration::from_millis(200)).await;
        let (third, _) = panel.on_start_requested().await.unwrap();
        assert_eq!(third, IntentOutcome::Accepted);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_presses_forwards_one_intent() {
        let panel = panel(TickPolicy::Gated);

        let mut outcomes = vec![panel.on_reset_requested().await.unwrap().0];
        for _ in 0..4 {
            sleep(Duration::from_millis(150)).await;
            outcomes.push(panel.on_reset_requested().await.unwrap().0);
        }

        let accepted = outcomes.iter().filter(|o| **o == IntentOutcome::Accepted).count();
        assert_eq!(accepted, 1);
        assert_eq!(outcomes[0], IntentOutcome::Accepted);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_right_after_start_is_not_debounced() {
        let panel = panel(TickPolicy::AlwaysOn);
        panel.on_start_requested().await.unwrap();

        let (outcome, state) = panel.on_stop_requested().await.unwrap();
        assert_eq!(outcome, IntentOutcome::Accepted);
        assert_eq!(state, TimerState { phase: Phase::Paused, value: 0 });
    }
}
