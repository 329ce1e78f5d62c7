//! Start/stop/reset state machine for a single timer

use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::tick_source::Tick;
use crate::state::{Phase, TimerState};

/// Outbound side of a display surface: receives every new value to render.
///
/// The controller only ever holds the sink, never the surface behind it.
pub trait ValueSink: Send {
    fn set_value(&self, value: u64);
}

impl<F> ValueSink for F
where
    F: Fn(u64) + Send,
{
    fn set_value(&self, value: u64) {
        self(value)
    }
}

/// How a timer subscribes to its tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickPolicy {
    /// Ticking is suspended while the timer is not running.
    Gated,
    /// Ticks keep firing and are discarded while the timer is not running.
    AlwaysOn,
}

/// A user request coming from a display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Start,
    Stop,
    Reset,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Start => "start",
            Intent::Stop => "stop",
            Intent::Reset => "reset",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct TimerController<S> {
    name: String,
    policy: TickPolicy,
    state: TimerState,
    sink: S,
}

impl<S: ValueSink> TimerController<S> {
    /// Create an idle controller at zero
    pub fn new(name: impl Into<String>, policy: TickPolicy, sink: S) -> Self {
        Self {
            name: name.into(),
            policy,
            state: TimerState::new(),
            sink,
        }
    }

    /// Idle/Paused -> Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state.phase = Phase::Running;
        info!("{} started at {}", self.name, self.state.value);
        true
    }

    /// Running -> Paused. Returns false if not running.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.state.phase = Phase::Paused;
        info!("{} stopped at {}", self.name, self.state.value);
        true
    }

    /// Back to idle at zero from any phase. Always notifies the sink with 0.
    pub fn reset(&mut self) {
        self.state = TimerState::new();
        info!("{} reset", self.name);
        self.sink.set_value(0);
    }

    /// Apply an intent, returning whether it changed anything observable.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Start => self.start(),
            Intent::Stop => self.stop(),
            Intent::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Consume a tick. Only a running timer counts it; anything else is dropped.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if !self.state.is_running() {
            debug!("{} discarded tick #{} while {}", self.name, tick.seq, self.state.phase.as_str());
            return false;
        }
        self.state.value += 1;
        self.sink.set_value(self.state.value);
        true
    }

    /// Whether the driving loop should keep the tick source armed
    pub fn wants_ticks(&self) -> bool {
        match self.policy {
            TickPolicy::Gated => self.state.is_running(),
            TickPolicy::AlwaysOn => true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn value(&self) -> u64 {
        self.state.value
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

impl<S> fmt::Debug for TimerController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerController")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<u64>>>;

    fn controller(policy: TickPolicy) -> (TimerController<impl ValueSink>, Recorded) {
        let seen: Recorded = Arc::default();
        let sink_seen = Arc::clone(&seen);
        let sink = move |value: u64| sink_seen.lock().unwrap().push(value);
        (TimerController::new("Timer", policy, sink), seen)
    }

    fn tick(seq: u64) -> Tick {
        Tick { seq }
    }

    #[test]
    fn three_ticks_while_running_count_to_three() {
        let (mut timer, seen) = controller(TickPolicy::Gated);
        assert!(timer.start());
        for seq in 1..=3 {
            assert!(timer.on_tick(tick(seq)));
        }

        assert_eq!(timer.value(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn ticks_after_stop_do_not_count() {
        let (mut timer, seen) = controller(TickPolicy::AlwaysOn);
        timer.start();
        timer.on_tick(tick(1));
        timer.on_tick(tick(2));
        assert!(timer.stop());
        for seq in 3..=5 {
            assert!(!timer.on_tick(tick(seq)));
        }
        assert_eq!(timer.value(), 2);
        assert_eq!(timer.phase(), Phase::Paused);

        timer.start();
        timer.on_tick(tick(6));
        timer.on_tick(tick(7));
        assert_eq!(timer.value(), 4);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn reset_after_a_tick_notifies_zero_once() {
        let (mut timer, seen) = controller(TickPolicy::Gated);
        timer.start();
        timer.on_tick(tick(1));
        seen.lock().unwrap().clear();

        timer.reset();

        assert_eq!(timer.state(), TimerState::new());
        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn reset_on_fresh_controller_still_notifies() {
        let (mut timer, seen) = controller(TickPolicy::AlwaysOn);
        assert!(timer.apply(Intent::Reset));
        assert_eq!(timer.value(), 0);
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn second_start_is_a_no_op() {
        let (mut timer, seen) = controller(TickPolicy::Gated);
        assert!(timer.start());
        assert!(!timer.start());
        timer.on_tick(tick(1));

        assert_eq!(timer.value(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn stop_when_not_running_is_a_no_op() {
        let (mut timer, seen) = controller(TickPolicy::Gated);
        assert!(!timer.stop());
        assert_eq!(timer.phase(), Phase::Idle);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn gated_policy_only_wants_ticks_while_running() {
        let (mut gated, _) = controller(TickPolicy::Gated);
        let (mut always, _) = controller(TickPolicy::AlwaysOn);
        assert!(!gated.wants_ticks());
        assert!(always.wants_ticks());

        gated.start();
        always.start();
        assert!(gated.wants_ticks());
        assert!(always.wants_ticks());

        gated.reset();
        always.reset();
        assert!(!gated.wants_ticks());
        assert!(always.wants_ticks());
    }

    #[derive(Clone, Copy, Debug)]
    enum Step {
        Intent(Intent),
        Tick,
    }

    const STEPS: [Step; 4] = [
        Step::Intent(Intent::Start),
        Step::Intent(Intent::Stop),
        Step::Intent(Intent::Reset),
        Step::Tick,
    ];

    /// Walks every sequence of up to five steps and checks the state machine
    /// against a plain counter model after each step.
    #[test]
    fn every_short_sequence_matches_the_counter_model() {
        fn walk(prefix: &mut Vec<Step>, depth: usize) {
            check(prefix);
            if depth == 0 {
                return;
            }
            for step in STEPS {
                prefix.push(step);
                walk(prefix, depth - 1);
                prefix.pop();
            }
        }

        fn check(steps: &[Step]) {
            let (mut timer, seen) = controller(TickPolicy::AlwaysOn);
            let mut running = false;
            let mut value = 0u64;
            let mut notifications = Vec::new();

            for (seq, step) in steps.iter().enumerate() {
                match step {
                    Step::Intent(intent) => {
                        timer.apply(*intent);
                        match intent {
                            Intent::Start => running = true,
                            Intent::Stop => running = false,
                            Intent::Reset => {
                                running = false;
                                value = 0;
                                notifications.push(0);
                            }
                        }
                    }
                    Step::Tick => {
                        timer.on_tick(tick(seq as u64 + 1));
                        if running {
                            value += 1;
                            notifications.push(value);
                        }
                    }
                }
                assert_eq!(timer.is_running(), running, "{steps:?}");
                assert_eq!(timer.value(), value, "{steps:?}");
                if timer.phase() == Phase::Idle {
                    assert_eq!(timer.value(), 0, "{steps:?}");
                }
            }
            assert_eq!(*seen.lock().unwrap(), notifications, "{steps:?}");
        }

        walk(&mut Vec::new(), 5);
    }
}
