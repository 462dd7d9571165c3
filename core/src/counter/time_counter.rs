//! Carry-correct unit arithmetic for a running timer
//!
//! A `TimeCounter` only ever moves one second at a time. Every advance keeps a
//! copy of the previous components so callers can ask which units changed on
//! the step that just happened.

use tempo_types::{Precision, TimeInput, TimeUnit, TimeValues};

use crate::timer::TimerError;

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// Direction of a single advance step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_countdown(countdown: bool) -> Self {
        if countdown { Direction::Down } else { Direction::Up }
    }
}

/// Total seconds represented by a component triple
pub fn total_seconds_of(values: &TimeValues) -> u64 {
    values
        .seconds
        .saturating_add(values.minutes.saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(
            values
                .hours
                .saturating_mul(SECONDS_PER_MINUTE * MINUTES_PER_HOUR),
        )
}

/// Current time of a timer, split into components.
///
/// Invariant: `seconds < 60` and `minutes < 60` between advances.
/// `total_seconds` is kept in sync on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeCounter {
    values: TimeValues,
    previous: TimeValues,
    total_seconds: u64,
}

impl TimeCounter {
    /// Counter at `00:00:00`
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at the given components.
    /// Out-of-range components are folded upward.
    pub fn from_values(values: TimeValues) -> Self {
        let values = fold(values.seconds, values.minutes, values.hours);
        Self {
            values,
            previous: values,
            total_seconds: total_seconds_of(&values),
        }
    }

    /// Fold user input into a canonical `[seconds, minutes, hours]` triple.
    ///
    /// Missing object fields count as zero. Array input must have exactly
    /// three elements.
    pub fn normalize(input: &TimeInput) -> Result<TimeValues, TimerError> {
        let [seconds, minutes, hours] = match input {
            TimeInput::Array(values) => <[u64; 3]>::try_from(values.as_slice())
                .map_err(|_| TimerError::InvalidTargetSize { len: values.len() })?,
            TimeInput::Units(units) => [
                units.seconds.unwrap_or(0),
                units.minutes.unwrap_or(0),
                units.hours.unwrap_or(0),
            ],
        };
        Ok(fold(seconds, minutes, hours))
    }

    /// Move one second up or down, carrying into minutes and hours.
    ///
    /// Counting down from `00:00:00` leaves the counter untouched.
    pub fn advance(&mut self, direction: Direction) {
        self.previous = self.values;
        let v = &mut self.values;

        match direction {
            Direction::Up => {
                v.seconds += 1;
                if v.seconds == SECONDS_PER_MINUTE {
                    v.seconds = 0;
                    v.minutes += 1;
                    if v.minutes == MINUTES_PER_HOUR {
                        v.minutes = 0;
                        v.hours = v.hours.saturating_add(1);
                    }
                }
            }
            Direction::Down => {
                if *v == TimeValues::ZERO {
                    return;
                }
                if v.seconds > 0 {
                    v.seconds -= 1;
                } else {
                    v.seconds = SECONDS_PER_MINUTE - 1;
                    if v.minutes > 0 {
                        v.minutes -= 1;
                    } else {
                        v.minutes = MINUTES_PER_HOUR - 1;
                        v.hours -= 1;
                    }
                }
            }
        }

        self.total_seconds = total_seconds_of(&self.values);
    }

    /// Current components
    pub fn values(&self) -> TimeValues {
        self.values
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Whole duration expressed in `unit`, rounded down
    pub fn total_in(&self, unit: TimeUnit) -> u64 {
        self.total_seconds / unit.seconds_per_unit()
    }

    /// Cumulative values at every scale (e.g. `7198s` → `{7198, 119, 1}`)
    pub fn total_values(&self) -> TimeValues {
        TimeValues {
            seconds: self.total_in(TimeUnit::Seconds),
            minutes: self.total_in(TimeUnit::Minutes),
            hours: self.total_in(TimeUnit::Hours),
        }
    }

    /// True if `unit` changed on the most recent advance
    pub fn unit_crossed(&self, unit: TimeUnit) -> bool {
        self.previous.get(unit) != self.values.get(unit)
    }

    /// Check whether `target` has been reached at `precision` granularity.
    ///
    /// The exact total must have reached the target, and so must the totals
    /// truncated to the precision unit. With minute precision `00:05:00` has
    /// not yet reached `00:05:05`.
    pub fn has_reached(
        &self,
        target: &TimeValues,
        precision: Precision,
        direction: Direction,
    ) -> bool {
        let unit = precision.unit();
        let target_total = total_seconds_of(target);
        let current = self.total_in(unit);
        let goal = target_total / unit.seconds_per_unit();

        match direction {
            Direction::Up => self.total_seconds >= target_total && current >= goal,
            Direction::Down => self.total_seconds <= target_total && current <= goal,
        }
    }
}

fn fold(seconds: u64, minutes: u64, hours: u64) -> TimeValues {
    let minutes = minutes.saturating_add(seconds / SECONDS_PER_MINUTE);
    TimeValues {
        seconds: seconds % SECONDS_PER_MINUTE,
        minutes: minutes % MINUTES_PER_HOUR,
        hours: hours.saturating_add(minutes / MINUTES_PER_HOUR),
    }
}
