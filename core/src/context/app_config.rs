use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use tempo_types::{Precision, TimerPreset};

use super::ConfigError;

pub const APP_NAME: &str = "tempo";

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Precision used when `start` is given none
    #[serde(default)]
    pub default_precision: Precision,
    #[serde(default)]
    pub default_countdown: bool,
    /// Print every seconds tick, not just minute and hour changes
    #[serde(default = "default_show_seconds")]
    pub show_seconds: bool,
    /// Saved run configurations keyed by name
    #[serde(default)]
    pub presets: HashMap<String, TimerPreset>,
}

fn default_show_seconds() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_precision: Precision::Seconds,
            default_countdown: false,
            show_seconds: default_show_seconds(),
            presets: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load the stored configuration, falling back to defaults if it is missing or unreadable
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default configuration");
            Self::default()
        })
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    pub fn try_save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self).map_err(ConfigError::Save)
    }

    pub fn preset(&self, name: &str) -> Result<&TimerPreset, ConfigError> {
        self.presets
            .get(name)
            .ok_or_else(|| ConfigError::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// Insert or replace a preset; returns the one it replaced
    pub fn set_preset(&mut self, name: impl Into<String>, preset: TimerPreset) -> Option<TimerPreset> {
        self.presets.insert(name.into(), preset)
    }

    pub fn remove_preset(&mut self, name: &str) -> Result<TimerPreset, ConfigError> {
        self.presets
            .remove(name)
            .ok_or_else(|| ConfigError::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// Preset names in alphabetical order
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
