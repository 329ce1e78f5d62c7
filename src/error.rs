//! Errors raised at the display surface boundary

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no timer with id {0}")]
    UnknownTimer(u8),
    #[error("timer {0} has no running event loop")]
    TimerUnavailable(u8),
}
