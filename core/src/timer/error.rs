//! Error types for timer operations

use thiserror::Error;

/// Errors raised synchronously by [`Timer::start`](super::Timer::start).
///
/// A failed start leaves the timer exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Timer already running")]
    AlreadyRunning,

    #[error("Array size not valid: expected 3 elements, got {len}")]
    InvalidTargetSize { len: usize },
}
