//! Timer engine
//!
//! This module provides:
//! - **Timer**: lifecycle, tick handling and event dispatch
//! - **Configuration**: raw `TimerConfig` input and the normalized `TimerSettings` snapshot
//! - **Events**: one strongly-typed observer list per `EventKind`
//!
//! # Modes
//!
//! - Regular timers count up from their start values
//! - Countdown timers count down toward their target (or zero)
//!
//! Either mode stops on its own once a configured target is reached at the
//! configured precision.

mod config;
mod engine;
mod error;
mod events;


pub use config::{TimerCallback, TimerConfig, TimerSettings};
pub use engine::{Timer, TimerStatus, WeakTimer};
pub use error::TimerError;
pub use events::{EventKind, Listener, ListenerId, TimerEvent};
