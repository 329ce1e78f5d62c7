//! Once-per-second tick emitter
//!
//! A [`TickSource`] is a lazy, infinite [`Stream`] of [`Tick`]s. It only
//! produces ticks while armed: [`TickSource::start`] arms it so that the
//! first tick lands one full period later, and [`TickSource::cancel`]
//! disarms it so nothing more is delivered. A disarmed source stays pending
//! instead of ending, which lets the owning loop re-arm it in place.

use std::{
    pin::Pin,
    task::{Context, Poll, Waker},
    time::Duration,
};
use futures::Stream;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Fixed cadence of every tick source
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A single elapsed period. `seq` counts ticks emitted by the source, from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub seq: u64,
}

#[derive(Debug)]
pub struct TickSource {
    interval: Option<Interval>,
    emitted: u64,
    waker: Option<Waker>,
}

impl TickSource {
    /// Create a disarmed source
    pub fn new() -> Self {
        Self {
            interval: None,
            emitted: 0,
            waker: None,
        }
    }

    /// Arm the source. Does nothing if it is already armed.
    pub fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }

        // First tick one period from now; a restart leaves a gap, never a backlog.
        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        debug!("Tick source armed after {} ticks", self.emitted);

        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }

    /// Disarm the source. Safe to call when never started or already cancelled.
    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            debug!("Tick source cancelled after {} ticks", self.emitted);
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Number of ticks delivered so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for TickSource {
    type Item = Tick;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Tick>> {
        let this = self.get_mut();

        match this.interval.as_mut() {
            Some(interval) => match interval.poll_tick(cx) {
                Poll::Ready(_) => {
                    this.emitted += 1;
                    Poll::Ready(Some(Tick { seq: this.emitted }))
                }
                Poll::Pending => Poll::Pending,
            },
            None => {
                this.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
