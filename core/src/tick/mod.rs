//! Tick sources
//!
//! The engine never owns a clock. It asks a [`TickSource`] for a periodic
//! callback and holds on to the returned [`Subscription`] until it stops.
//!
//! - **VirtualClock**: manually advanced clock for deterministic tests and replays
//! - **IntervalTicker**: wall-clock ticks from `tokio::time::interval`

mod interval;
mod source;
mod virtual_clock;

pub use interval::IntervalTicker;
pub use source::{Subscription, TICK_INTERVAL, TickCallback, TickSource};
pub use virtual_clock::VirtualClock;
