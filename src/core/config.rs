//! Logger configuration

use super::color::ColorMode;
use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Days a rotated log file is kept before it is deleted
pub const DEFAULT_RETENTION_DAYS: u32 = 15;

/// Directory name, relative to the working directory, used when none is given
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Construction-time settings of a [`crate::Logger`]. Immutable once the
/// logger is built.
///
/// # Examples
///
/// ```
/// use prefix_logger::core::{ColorMode, LoggerConfig};
///
/// let config = LoggerConfig::new("billing")
///     .with_prefix("[worker-1]")
///     .with_color_mode(ColorMode::Production)
///     .with_retention_days(30);
/// assert!(config.validate().is_ok());
///
/// let parsed = LoggerConfig::from_json(r#"{"project_name": "billing", "color_mode": "production"}"#).unwrap();
/// assert_eq!(parsed.retention_days, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Used in log file names
    pub project_name: String,
    /// Prepended to every line followed by a space; empty means no prefix
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "ColorMode::from_env")]
    pub color_mode: ColorMode,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Gzip a day's file once the sink rotates away from it
    #[serde(default)]
    pub compress_rotated: bool,
    /// Queue capacity for delivering lines from a worker thread; `None`
    /// writes on the calling thread
    #[serde(default)]
    pub async_buffer: Option<usize>,
}

fn default_log_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_LOG_DIR)
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

impl LoggerConfig {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            prefix: String::new(),
            color_mode: ColorMode::from_env(),
            log_dir: default_log_dir(),
            retention_days: DEFAULT_RETENTION_DAYS,
            compress_rotated: false,
            async_buffer: None,
        }
    }

    /// Parse a JSON configuration document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress_rotated = enabled;
        self
    }

    /// Hand lines to a worker thread through a bounded queue of `capacity`
    #[must_use]
    pub fn with_async_buffer(mut self, capacity: usize) -> Self {
        self.async_buffer = Some(capacity);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "project_name must not be empty"));
        }
        if self.project_name.contains(['/', '\\']) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!(
                    "project_name '{}' must not contain path separators",
                    self.project_name
                ),
            ));
        }
        if self.async_buffer == Some(0) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "async_buffer must be at least 1",
            ));
        }
        if self.retention_days == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "retention_days must be at least 1",
            ));
        }
        Ok(())
    }
}
