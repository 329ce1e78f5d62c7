//! Input debouncing for surface intents

use std::time::Duration;
use tokio::time::Instant;

use crate::timer::Intent;

/// Default suppression window for repeated activations of one control, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

/// Timestamp-based suppression of repeated intents.
///
/// The first press of a control goes through. Every press of that control,
/// forwarded or not, restarts the window, so a burst of presses spaced
/// closer than `window` forwards exactly one intent. Different kinds never
/// suppress each other, so a start followed at once by a stop both go through.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_press: [Option<Instant>; 3],
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: [None; 3],
        }
    }

    /// Decide whether `intent` arriving now should be forwarded
    pub fn accept(&mut self, intent: Intent) -> bool {
        self.accept_at(intent, Instant::now())
    }

    pub fn accept_at(&mut self, intent: Intent, now: Instant) -> bool {
        let previous = self.last_press[slot(intent)].replace(now);

        match previous {
            Some(previous) => now.saturating_duration_since(previous) >= self.window,
            None => true,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

fn slot(intent: Intent) -> usize {
    match intent {
        Intent::Start => 0,
        Intent::Stop => 1,
        Intent::Reset => 2,
    }
}
