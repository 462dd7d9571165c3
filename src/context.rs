use std::cell::RefCell;
use std::rc::Rc;

use tempo_core::context::{AppConfig, ConfigError};
use tempo_core::tick::{IntervalTicker, TickSource};
use tempo_core::timer::{EventKind, Timer, TimerEvent};

/// Shared handle to the loaded configuration
pub type ConfigHandle = Rc<RefCell<AppConfig>>;

/// Holds all shared state for the REPL.
///
/// Lives on the REPL thread; the timer is driven by local tasks.
#[derive(Clone)]
pub struct CliContext {
    pub timer: Timer,
    pub config: ConfigHandle,
    /// Write config changes back to disk
    persist: bool,
}

impl CliContext {
    /// Context with the stored configuration and a wall-clock timer.
    ///
    /// Must be created inside a `tokio::task::LocalSet`.
    pub fn new() -> Self {
        Self::build(IntervalTicker, AppConfig::load(), true)
    }

    /// Context that never touches the stored configuration
    pub fn in_memory(ticks: impl TickSource + 'static, config: AppConfig) -> Self {
        Self::build(ticks, config, false)
    }

    fn build(ticks: impl TickSource + 'static, config: AppConfig, persist: bool) -> Self {
        let ctx = Self {
            timer: Timer::new(ticks),
            config: Rc::new(RefCell::new(config)),
            persist,
        };
        ctx.attach_printers();
        ctx
    }

    /// Persist the current configuration (no-op for in-memory contexts)
    pub fn save_config(&self) -> Result<(), ConfigError> {
        if !self.persist {
            return Ok(());
        }
        self.config.borrow().try_save()
    }

    fn attach_printers(&self) {
        let config = Rc::clone(&self.config);
        self.timer
            .add_event_listener(EventKind::SecondsUpdated, move |event| {
                if config.borrow().show_seconds {
                    println!("{}", event.values());
                }
            });

        for kind in [
            EventKind::Started,
            EventKind::MinutesUpdated,
            EventKind::HoursUpdated,
            EventKind::TargetAchieved,
        ] {
            self.timer
                .add_event_listener(kind, |event| println!("{}", describe(event)));
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line description of a timer event
pub fn describe(event: &TimerEvent) -> String {
    match event {
        TimerEvent::Started { values } => format!("started at {values}"),
        TimerEvent::SecondsUpdated { values, .. } => values.to_string(),
        TimerEvent::MinutesUpdated { values, totals } => {
            format!("{values} ({} minutes)", totals.minutes)
        }
        TimerEvent::HoursUpdated { values, totals } => {
            format!("{values} ({} hours)", totals.hours)
        }
        TimerEvent::TargetAchieved { target, .. } => format!("target {target} achieved"),
    }
}
