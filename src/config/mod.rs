//! Agent configuration loaded from a TOML file with environment overrides.
//!
//! Environment variables prefixed with `HERALD_` override file values, with
//! `__` separating nested keys (for example `HERALD_RETRY__MAX_RETRIES=5`).

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::RetryPolicy;

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The configuration file path was not valid UTF-8.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),
    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),
    /// The configuration failed to parse or deserialize.
    #[error("failed to load configuration: {0}")]
    Parse(#[from] ConfigError),
}

/// Retry pacing settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Maximum retries after the first attempt.
    pub max_retries: u32,
    /// Backoff base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Backoff delay cap in milliseconds.
    pub max_delay_ms: u64,
    /// Jitter amplitude as a percentage of the capped delay (0-100).
    pub jitter_percent: u8,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 60_000,
            jitter_percent: 10,
        }
    }
}

impl RetrySettings {
    /// Bridges these settings to a retry policy.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.max_delay_ms),
            self.jitter_percent,
        )
    }
}

/// Remote provider settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Top-level agent configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Retry pacing.
    pub retry: RetrySettings,
    /// Provider selection and limits.
    pub provider: ProviderSettings,
}

impl AgentConfig {
    /// Loads configuration from a TOML file plus `HERALD__` env overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        let path_str = path
            .to_str()
            .ok_or_else(|| ConfigLoadError::InvalidPath(format!("{path:?}")))?;

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path_str.to_string()));
        }

        let config = Config::builder()
            .add_source(File::with_name(path_str))
            .add_source(
                Environment::with_prefix("HERALD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigLoadError::FileNotFound(_)) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }
}
