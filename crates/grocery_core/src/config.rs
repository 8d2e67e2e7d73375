//! Runtime configuration for hosts embedding the grocery core.
//!
//! # Responsibility
//! - Resolve database location and logging options from the environment.
//! - Validate values once so callers can trust a built `AppConfig`.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GROCERY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "GROCERY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GROCERY_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "grocery.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Logging stays disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads `GROCERY_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }
        config.log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        Ok(config)
    }

    /// Applies explicit overrides, typically from command-line flags.
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        log_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        if let Some(level) = log_level {
            self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        }
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        Ok(self)
    }
}
