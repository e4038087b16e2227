//! TOML-based application configuration.
//!
//! Stores:
//! - Scoring parameters (task-switch ceiling)
//! - History window sizes and demo seeding
//! - Default signal values used when the dashboard starts
//! - Text rendering preferences
//!
//! Configuration is stored at `~/.config/flowstate/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::energy::{ScoringParams, SignalInput, DEFAULT_BURNOUT_WINDOW, DEFAULT_HISTORY_WINDOW};
use crate::error::ConfigError;

/// Energy formula configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Task switches per session at which the switching penalty saturates.
    #[serde(default = "default_switch_ceiling")]
    pub switch_ceiling: f64,
}

/// Energy history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Days kept in the rolling history.
    #[serde(default = "default_history_window")]
    pub window: usize,
    /// Trailing days averaged for burnout risk.
    #[serde(default = "default_burnout_window")]
    pub burnout_window: usize,
    /// Days of mock history generated at session start.
    #[serde(default = "default_history_window")]
    pub seed_days: usize,
    /// Fixed seed for the mock history. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Text rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Print the formula breakdown under the score card.
    #[serde(default)]
    pub show_breakdown: bool,
    /// Width of the bars in the weekly chart.
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/flowstate/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    /// Starting signals, also the target of a reset.
    #[serde(default)]
    pub signals: SignalInput,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_switch_ceiling() -> f64 {
    crate::energy::DEFAULT_SWITCH_CEILING
}
fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}
fn default_burnout_window() -> usize {
    DEFAULT_BURNOUT_WINDOW
}
fn default_chart_width() -> usize {
    30
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            switch_ceiling: default_switch_ceiling(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window: default_history_window(),
            burnout_window: default_burnout_window(),
            seed_days: default_history_window(),
            seed: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_breakdown: false,
            chart_width: default_chart_width(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            history: HistoryConfig::default(),
            signals: SignalInput::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                break;
            }
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    // Optional fields that are currently unset.
                    serde_json::Value::Null => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::debug!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject settings the engine cannot work with.
    ///
    /// Signal defaults are not range-checked: the formula accepts anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ceiling = self.scoring.switch_ceiling;
        if !ceiling.is_finite() || ceiling <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "scoring.switch_ceiling".into(),
                message: format!("must be a positive number, got {ceiling}"),
            });
        }
        if self.history.window == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history.window".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.history.burnout_window == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history.burnout_window".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            switch_ceiling: self.scoring.switch_ceiling,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("falling back to default config: {e}");
            Self::default()
        })
    }
}
