//! Configuration for the Text Watch.

use crate::vitals::{
    AggregatorConfig, DEFAULT_MIN_VALID_PULSE, DEFAULT_REQUIRED_SAMPLES, DEFAULT_WINDOW_PERIOD,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Main configuration for the watch core and its terminal host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Period between heart-rate measurement windows
    #[serde(with = "duration_serde")]
    pub hrm_window_period: Duration,

    /// Valid readings averaged into one pulse value
    pub required_hrm_samples: u32,

    /// Readings at or below this are discarded as glitches
    pub min_valid_pulse: f32,

    /// Tick interval in normal mode
    #[serde(with = "duration_serde")]
    pub tick_interval: Duration,

    /// Tick interval in ambient (low-power) mode
    #[serde(with = "duration_serde")]
    pub ambient_tick_interval: Duration,

    /// Battery level reported by the terminal host, which has no battery
    pub battery_percent: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hrm_window_period: DEFAULT_WINDOW_PERIOD,
            required_hrm_samples: DEFAULT_REQUIRED_SAMPLES,
            min_valid_pulse: DEFAULT_MIN_VALID_PULSE,
            tick_interval: Duration::from_secs(1),
            ambient_tick_interval: Duration::from_secs(60),
            battery_percent: 100,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("textwatch")
            .join("config.json")
    }

    /// Reject values the watch core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_hrm_samples == 0 {
            return Err(ConfigError::Invalid(
                "required_hrm_samples must be at least 1".to_string(),
            ));
        }
        if self.hrm_window_period.is_zero() {
            return Err(ConfigError::Invalid(
                "hrm_window_period must be positive".to_string(),
            ));
        }
        if self.tick_interval.is_zero() || self.ambient_tick_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "tick intervals must be positive".to_string(),
            ));
        }
        if !self.min_valid_pulse.is_finite() || self.min_valid_pulse < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_valid_pulse must be a non-negative number, got {}",
                self.min_valid_pulse
            )));
        }
        if self.battery_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "battery_percent {} is above 100",
                self.battery_percent
            )));
        }
        Ok(())
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            required_samples: self.required_hrm_samples,
            min_valid_pulse: self.min_valid_pulse,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(serde_json::Error),
    #[error("Serialize error: {0}")]
    Serialize(serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Serde support for Duration.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
