//! Shared time and configuration types for tempo
//!
//! This crate contains serializable types that are shared between the timer
//! engine (tempo-core) and the command line front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Units & Precision
// ─────────────────────────────────────────────────────────────────────────────

/// A single component of a time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// All units, finest first
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Seconds, TimeUnit::Minutes, TimeUnit::Hours];

    /// Number of seconds in one of this unit
    pub fn seconds_per_unit(&self) -> u64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3600,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granularity at which a timer invokes its callback and evaluates its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl Precision {
    /// The time unit this precision is measured in
    pub fn unit(&self) -> TimeUnit {
        match self {
            Precision::Seconds => TimeUnit::Seconds,
            Precision::Minutes => TimeUnit::Minutes,
            Precision::Hours => TimeUnit::Hours,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit().as_str())
    }
}

/// Error returned when parsing an unknown precision name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPrecision(pub String);

impl fmt::Display for UnknownPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown precision '{}' (expected seconds, minutes or hours)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPrecision {}

impl FromStr for Precision {
    type Err = UnknownPrecision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "second" | "s" => Ok(Precision::Seconds),
            "minutes" | "minute" | "m" => Ok(Precision::Minutes),
            "hours" | "hour" | "h" => Ok(Precision::Hours),
            _ => Err(UnknownPrecision(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time Values
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical `(seconds, minutes, hours)` triple.
///
/// Used both for component values (`seconds < 60`, `minutes < 60`) and for
/// cumulative totals, where each field holds the whole duration in that unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeValues {
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
}

impl TimeValues {
    pub const ZERO: TimeValues = TimeValues {
        seconds: 0,
        minutes: 0,
        hours: 0,
    };

    pub fn new(seconds: u64, minutes: u64, hours: u64) -> Self {
        Self {
            seconds,
            minutes,
            hours,
        }
    }

    /// Returns `[seconds, minutes, hours]`
    pub fn to_array(&self) -> [u64; 3] {
        [self.seconds, self.minutes, self.hours]
    }

    pub fn get(&self, unit: TimeUnit) -> u64 {
        match unit {
            TimeUnit::Seconds => self.seconds,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Hours => self.hours,
        }
    }
}

impl From<[u64; 3]> for TimeValues {
    fn from([seconds, minutes, hours]: [u64; 3]) -> Self {
        Self::new(seconds, minutes, hours)
    }
}

/// Formats as `HH:MM:SS`. Hours are never wrapped.
impl fmt::Display for TimeValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time Input (object-or-array)
// ─────────────────────────────────────────────────────────────────────────────

/// Sparse time object; missing fields count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeUnits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
}

/// User-supplied start values or target.
///
/// Uses untagged serde: a sequence is read as `[seconds, minutes, hours]`,
/// a map as a sparse [`TimeUnits`] object. Values are not normalized here;
/// the engine folds overflow and validates the array length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    Array(Vec<u64>),
    Units(TimeUnits),
}

impl TimeInput {
    /// Shorthand for a sparse object with every field set
    pub fn units(seconds: u64, minutes: u64, hours: u64) -> Self {
        Self::Units(TimeUnits {
            seconds: Some(seconds),
            minutes: Some(minutes),
            hours: Some(hours),
        })
    }

    pub fn seconds(seconds: u64) -> Self {
        Self::Units(TimeUnits {
            seconds: Some(seconds),
            ..Default::default()
        })
    }

    pub fn minutes(minutes: u64) -> Self {
        Self::Units(TimeUnits {
            minutes: Some(minutes),
            ..Default::default()
        })
    }

    pub fn hours(hours: u64) -> Self {
        Self::Units(TimeUnits {
            hours: Some(hours),
            ..Default::default()
        })
    }

    /// Parse from user input: comma separated `seconds,minutes,hours`.
    ///
    /// The element count is kept as given so the engine can reject it.
    pub fn from_input(input: &str) -> Result<Self, std::num::ParseIntError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::Array(Vec::new()));
        }
        trimmed
            .split(',')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Array)
    }
}

impl Default for TimeInput {
    fn default() -> Self {
        Self::Units(TimeUnits::default())
    }
}

impl From<[u64; 3]> for TimeInput {
    fn from(values: [u64; 3]) -> Self {
        Self::Array(values.to_vec())
    }
}

impl From<TimeValues> for TimeInput {
    fn from(values: TimeValues) -> Self {
        Self::units(values.seconds, values.minutes, values.hours)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Presets
// ─────────────────────────────────────────────────────────────────────────────

/// A named, persisted run configuration (everything but the callback).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerPreset {
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub countdown: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_values: Option<TimeInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TimeInput>,
}
