//! Timer event loop task
//!
//! Each timer runs on its own task that owns the controller and its tick
//! source. Intents and ticks are handled one at a time on that task, so the
//! timer state needs no lock.

use futures::StreamExt;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::{
    state::TimerState,
    timer::{Intent, TickSource, TimerController, ValueSink},
};

const INTENT_BUFFER: usize = 16;

/// An intent plus the channel the resulting state is reported back on
#[derive(Debug)]
pub struct IntentRequest {
    pub intent: Intent,
    pub reply: oneshot::Sender<TimerState>,
}

/// Surface-side handle to a running timer task. Dropping every handle ends the task.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    intents: mpsc::Sender<IntentRequest>,
    states: watch::Receiver<TimerState>,
}

impl TimerHandle {
    /// Forward an intent and wait for the state after it was applied.
    /// Returns `None` if the task is gone.
    pub async fn request(&self, intent: Intent) -> Option<TimerState> {
        let (reply, reply_rx) = oneshot::channel();
        self.intents.send(IntentRequest { intent, reply }).await.ok()?;
        reply_rx.await.ok()
    }

    /// Latest state published by the task
    pub fn state(&self) -> TimerState {
        *self.states.borrow()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.states.clone()
    }
}

/// Spawn the event loop for `controller` on the current runtime
pub fn spawn_timer<S>(controller: TimerController<S>) -> TimerHandle
where
    S: ValueSink + 'static,
{
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
    let (state_tx, state_rx) = watch::channel(controller.state());

    tokio::spawn(timer_task(controller, intent_rx, state_tx));

    TimerHandle {
        intents: intent_tx,
        states: state_rx,
    }
}

/// Drive one controller until its intent channel closes
pub async fn timer_task<S: ValueSink>(
    mut controller: TimerController<S>,
    mut intents: mpsc::Receiver<IntentRequest>,
    state_tx: watch::Sender<TimerState>,
) {
    info!("Starting timer task for {} ({:?} ticks)", controller.name(), controller.policy());

    let mut ticks = TickSource::new();
    sync_tick_source(&controller, &mut ticks);

    loop {
        tokio::select! {
            // Intents first, so a stop is always seen before a tick that is due at the same time
            biased;

            request = intents.recv() => {
                let Some(IntentRequest { intent, reply }) = request else {
                    info!("All surfaces for {} are gone, stopping timer task", controller.name());
                    break;
                };

                let was_running = controller.is_running();
                if controller.apply(intent) {
                    sync_tick_source(&controller, &mut ticks);
                    state_tx.send_replace(controller.state());
                } else {
                    debug!("{} ignored {} while {}", controller.name(), intent, controller.phase().as_str());
                }

                if controller.is_running() != was_running {
                    debug!("{} running: {}", controller.name(), controller.is_running());
                }

                if reply.send(controller.state()).is_err() {
                    debug!("Requester for {} went away before the reply", controller.name());
                }
            }

            Some(tick) = ticks.next() => {
                if controller.on_tick(tick) {
                    debug!("{} tick #{} -> {}", controller.name(), tick.seq, controller.value());
                    state_tx.send_replace(controller.state());
                }
            }
        }
    }

    ticks.cancel();
}

/// Arm or disarm the tick source according to the controller's policy
fn sync_tick_source<S: ValueSink>(controller: &TimerController<S>, ticks: &mut TickSource) {
    if controller.wants_ticks() {
        ticks.start();
    } else {
        ticks.cancel();
    }
}
