//! Timer configuration
//!
//! `TimerConfig` is what callers hand to `start`: raw, possibly sparse or
//! overflowing input. `TimerSettings` is the normalized snapshot the engine
//! keeps and reports back through `Timer::config`.

use std::fmt;
use std::rc::Rc;

use tempo_types::{Precision, TimeInput, TimeValues, TimerPreset};

use super::TimerError;
use crate::counter::{Direction, TimeCounter};

/// Invoked once per tick at the configured precision with the current values
pub type TimerCallback = Rc<dyn Fn(&TimeValues)>;

fn noop_callback() -> TimerCallback {
    Rc::new(|_: &TimeValues| {})
}

/// Options for a single run of a timer
#[derive(Clone, Default)]
pub struct TimerConfig {
    pub precision: Precision,
    pub countdown: bool,
    pub start_values: Option<TimeInput>,
    pub target: Option<TimeInput>,
    pub callback: Option<TimerCallback>,
}

impl TimerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn countdown(mut self, countdown: bool) -> Self {
        self.countdown = countdown;
        self
    }

    pub fn start_values(mut self, start_values: impl Into<TimeInput>) -> Self {
        self.start_values = Some(start_values.into());
        self
    }

    pub fn target(mut self, target: impl Into<TimeInput>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn callback(mut self, callback: impl Fn(&TimeValues) + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }
}

impl From<&TimerPreset> for TimerConfig {
    fn from(preset: &TimerPreset) -> Self {
        Self {
            precision: preset.precision,
            countdown: preset.countdown,
            start_values: preset.start_values.clone(),
            target: preset.target.clone(),
            callback: None,
        }
    }
}

impl fmt::Debug for TimerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerConfig")
            .field("precision", &self.precision)
            .field("countdown", &self.countdown)
            .field("start_values", &self.start_values)
            .field("target", &self.target)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Normalized configuration held by a running or finished timer
#[derive(Clone)]
pub struct TimerSettings {
    pub precision: Precision,
    pub countdown: bool,
    pub start_values: TimeValues,
    /// `None` runs until stopped
    pub target: Option<TimeValues>,
    pub callback: TimerCallback,
}

impl TimerSettings {
    /// Normalize start values and target; nothing is kept if either fails
    pub fn from_config(config: TimerConfig) -> Result<Self, TimerError> {
        let start_values = match &config.start_values {
            Some(input) => TimeCounter::normalize(input)?,
            None => TimeValues::ZERO,
        };
        let target = config
            .target
            .as_ref()
            .map(TimeCounter::normalize)
            .transpose()?;

        Ok(Self {
            precision: config.precision,
            countdown: config.countdown,
            start_values,
            target,
            callback: config.callback.unwrap_or_else(noop_callback),
        })
    }

    pub fn direction(&self) -> Direction {
        Direction::from_countdown(self.countdown)
    }

    /// True when the run would already be complete before the first tick
    pub fn starts_at_target(&self) -> bool {
        self.target == Some(self.start_values)
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            countdown: false,
            start_values: TimeValues::ZERO,
            target: None,
            callback: noop_callback(),
        }
    }
}

impl fmt::Debug for TimerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSettings")
            .field("precision", &self.precision)
            .field("countdown", &self.countdown)
            .field("start_values", &self.start_values)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
