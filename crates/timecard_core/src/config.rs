//! Runtime configuration.
//!
//! Defaults apply unless an environment variable overrides them:
//! - `TIMECARD_IDLE_TIMEOUT_SECS`: idle logout delay, whole seconds > 0.
//! - `TIMECARD_LOG_LEVEL`: trace|debug|info|warn|error.
//! - `TIMECARD_LOG_DIR`: absolute log directory; logging is off when unset.

use crate::logging::{default_log_level, normalize_level};
use crate::session::timer::DEFAULT_IDLE_TIMEOUT;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_IDLE_TIMEOUT_SECS: &str = "TIMECARD_IDLE_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "TIMECARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TIMECARD_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub idle_timeout: Duration,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid `{key}` value `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = get(ENV_IDLE_TIMEOUT_SECS) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: ENV_IDLE_TIMEOUT_SECS,
                    value: raw.clone(),
                    reason: "expected a positive number of seconds",
                })?;
            config.idle_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(ENV_LOG_LEVEL) {
            let level = normalize_level(&raw).map_err(|_| ConfigError::Invalid {
                key: ENV_LOG_LEVEL,
                value: raw.clone(),
                reason: "expected trace|debug|info|warn|error",
            })?;
            config.log_level = level.to_string();
        }

        if let Some(raw) = get(ENV_LOG_DIR) {
            let dir = PathBuf::from(&raw);
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid {
                    key: ENV_LOG_DIR,
                    value: raw,
                    reason: "expected an absolute path",
                });
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}
