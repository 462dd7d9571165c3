pub mod context;
pub mod counter;
pub mod tick;
pub mod timer;

// Re-exports for convenience
pub use context::{AppConfig, ConfigError};
pub use counter::{Direction, TimeCounter};
pub use tempo_types::{Precision, TimeInput, TimeUnit, TimeUnits, TimeValues, TimerPreset};
pub use tick::{IntervalTicker, Subscription, TICK_INTERVAL, TickSource, VirtualClock};
pub use timer::{
    EventKind, ListenerId, Timer, TimerConfig, TimerError, TimerEvent, TimerSettings, TimerStatus,
    WeakTimer,
};
