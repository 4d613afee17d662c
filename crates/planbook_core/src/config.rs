//! Environment-driven core configuration.
//!
//! # Responsibility
//! - Parse log level and log directory settings.
//! - Provide build-mode defaults.
//!
//! # Invariants
//! - A configured log directory is always absolute.
//! - Unset variables fall back to defaults; malformed ones are errors.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const LOG_LEVEL_ENV: &str = "PLANBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PLANBOOK_LOG_DIR";

/// Supported log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> LogLevel {
    if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    EmptyLogDir,
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Core runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: LogLevel,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `PLANBOOK_LOG_LEVEL` and `PLANBOOK_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_ENV).filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => default_log_level(),
        };
        let log_dir = lookup(LOG_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(|value| normalize_log_dir(&value))
            .transpose()?;
        Ok(Self { log_level, log_dir })
    }
}

/// Trims and checks a log directory path.
pub fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, normalize_log_dir, ConfigError, CoreConfig, LogLevel, LOG_DIR_ENV,
        LOG_LEVEL_ENV,
    };
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn level_parse_accepts_aliases() {
        assert_eq!(" WARNING ".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(
            "loud".parse::<LogLevel>().unwrap_err(),
            ConfigError::InvalidLogLevel("loud".to_string())
        );
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_ENV, "info"),
            (LOG_DIR_ENV, "logs/dev"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("absolute"));
        assert_eq!(normalize_log_dir("  "), Err(ConfigError::EmptyLogDir));
    }
}
