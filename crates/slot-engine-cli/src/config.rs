//! Configuration loading: optional TOML file with environment overrides.
//!
//! Looks for `slots.toml` in the working directory unless `--config` names a
//! file. Every field has a default, so the default file may be absent.
//! Environment variables take precedence over file values.

use std::path::Path;

use serde::Deserialize;
use slot_engine::{Minutes, DEFAULT_STEP_MINUTES};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_CONFIG_FILE: &str = "slots.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Slot generation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minutes between successive candidate slot starts.
    pub step_minutes: Minutes,
}

/// Logging settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "slot_engine=info,slots=info".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from `slots.toml` when `path` is `None`, then apply
    /// environment overrides and validate.
    ///
    /// An explicitly named file must exist; the default file is optional.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_optional_file(Path::new(DEFAULT_CONFIG_FILE))?,
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SLOTS_STEP_MINUTES") {
            self.engine.step_minutes = parse_step_override(&val)?;
        }
        if let Ok(val) = std::env::var("SLOTS_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.step_minutes == 0 {
            return Err(ConfigError::Validation(
                "engine.step_minutes must be non-zero".to_string(),
            ));
        }
        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            ConfigError::Validation(format!(
                "logging.filter {:?} is not a valid directive: {}",
                self.logging.filter, e
            ))
        })?;
        Ok(())
    }
}

fn parse_step_override(val: &str) -> Result<Minutes, ConfigError> {
    val.parse().map_err(|_| {
        ConfigError::Validation(format!(
            "SLOTS_STEP_MINUTES={:?} is not a number of minutes",
            val
        ))
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
