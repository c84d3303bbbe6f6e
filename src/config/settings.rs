//! User settings
//!
//! Small JSON file in the platform config dir. Environment variables override
//! file values; invalid values are replaced with defaults and reported as
//! `SettingsWarning`s, which the caller logs once tracing is set up.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::config::{APP_DIR, FILENAME, LOG_LEVEL_ENV, WEIGHT_UNIT_ENV};
use crate::units::WeightUnit;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display unit for all weights
    #[serde(default)]
    pub weight_unit: WeightUnit,

    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// A settings value that was rejected while loading
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsWarning {
    InvalidUnitEnv { value: String, error: String },
    UnknownLogLevel(String),
}

impl SettingsWarning {
    pub fn log(&self) {
        match self {
            SettingsWarning::InvalidUnitEnv { value, error } => {
                warn!(
                    var = WEIGHT_UNIT_ENV,
                    value = %value,
                    error = %error,
                    "Ignoring invalid env var"
                )
            }
            SettingsWarning::UnknownLogLevel(level) => {
                warn!(
                    log_level = %level,
                    using = %default_log_level(),
                    "Unknown log_level, using default"
                )
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    /// Load from the default location with env overrides applied. Runs
    /// before logging is initialized, so rejected values are returned.
    pub fn load() -> Result<(Self, Vec<SettingsWarning>)> {
        let mut settings = Self::load_from(&Self::path())?;
        let mut warnings = settings.apply_env_overrides();
        warnings.extend(settings.validate());
        Ok((settings, warnings))
    }

    /// Missing file means defaults; a file that fails to parse is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No settings file found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings JSON from {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| {
                    format!("Failed to create config directory {}", parent.display())
                })?;
        }
        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize settings to JSON")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Vec<SettingsWarning> {
        let mut warnings = Vec::new();
        if let Ok(raw) = env::var(WEIGHT_UNIT_ENV) {
            match raw.parse::<WeightUnit>() {
                Ok(unit) => self.weight_unit = unit,
                Err(error) => warnings.push(SettingsWarning::InvalidUnitEnv { value: raw, error }),
            }
        }
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        warnings
    }

    /// Normalize values to ones the rest of the app understands
    fn validate(&mut self) -> Vec<SettingsWarning> {
        let level = self.log_level.trim().to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            self.log_level = level;
            Vec::new()
        } else {
            let rejected = std::mem::replace(&mut self.log_level, default_log_level());
            vec![SettingsWarning::UnknownLogLevel(rejected)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.weight_unit, WeightUnit::Grams);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = Settings {
            weight_unit: WeightUnit::Ounces,
            log_level: "debug".to_string(),
        };
        settings.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"oz\""));
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"weight_unit": "lb"}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.weight_unit, WeightUnit::Pounds);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_invalid_log_level_replaced_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"log_level": "LOUD"}"#).unwrap();
        let mut settings = Settings::load_from(&path).unwrap();
        assert_eq!(
            settings.validate(),
            vec![SettingsWarning::UnknownLogLevel("LOUD".to_string())]
        );
        assert_eq!(settings.log_level, "warn");

        fs::write(&path, r#"{"log_level": " Info "}"#).unwrap();
        let mut settings = Settings::load_from(&path).unwrap();
        assert!(settings.validate().is_empty());
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ weight_unit = ").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }
}
