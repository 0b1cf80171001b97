//! Terminal color policy
//!
//! Decides whether a severity label or timestamp gets wrapped in ANSI escape
//! sequences. The decision depends only on the [`ColorMode`] the policy was
//! built with; nothing here reads the environment per line.

use super::log_level::LogLevel;
use colored::Color;
use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`ColorMode::from_env`]
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Label kind that selects the timestamp styling
pub const TIMESTAMP_KIND: &str = "timestamp";

const RESET: &str = "\x1b[0m";

/// Whether colors are emitted at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Development / interactive terminal: labels and timestamps are colored
    #[default]
    Interactive,
    /// Production: no escape sequences, labels are still uppercased
    Production,
}

impl ColorMode {
    /// Resolve the mode from `APP_ENV`. Only `production` (any case) selects
    /// [`ColorMode::Production`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ENVIRONMENT_VAR).ok().as_deref())
    }

    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => ColorMode::Production,
            _ => ColorMode::Interactive,
        }
    }
}

/// Wraps severity labels and timestamps in color codes according to a [`ColorMode`].
///
/// # Examples
///
/// ```
/// use prefix_logger::core::{ColorMode, ColorPolicy, LogLevel};
///
/// let policy = ColorPolicy::new(ColorMode::Production);
/// assert_eq!(policy.level(LogLevel::Error), "ERROR");
/// assert_eq!(policy.timestamp("03/11, 09:05:00"), "03/11, 09:05:00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorPolicy {
    mode: ColorMode,
}

impl ColorPolicy {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Colorize a label of the given kind.
    ///
    /// `kind` is either `"timestamp"` (in which case `content` is what gets
    /// styled) or a severity label. Matching is case-insensitive; any label
    /// outside `debug`, `info`, `warn`, `error` gets the default cyan.
    #[must_use]
    pub fn colorize(&self, kind: &str, content: Option<&str>) -> String {
        let label = kind.to_uppercase();
        let lower = label.to_lowercase();

        if self.mode == ColorMode::Production {
            return if lower == TIMESTAMP_KIND {
                content.unwrap_or_default().to_string()
            } else {
                label
            };
        }

        if lower == TIMESTAMP_KIND {
            return format!(
                "\x1b[{};{}m{}{}",
                Color::Magenta.to_bg_str(),
                Color::BrightWhite.to_fg_str(),
                content.unwrap_or_default(),
                RESET
            );
        }

        let color = LogLevel::ALL
            .iter()
            .find(|level| level.as_str() == lower)
            .map(LogLevel::color_code)
            .unwrap_or(Color::Cyan);
        paint(&label, color)
    }

    /// Colorize a severity label
    #[must_use]
    pub fn level(&self, level: LogLevel) -> String {
        self.colorize(level.as_str(), None)
    }

    /// Colorize a formatted timestamp
    #[must_use]
    pub fn timestamp(&self, content: &str) -> String {
        self.colorize(TIMESTAMP_KIND, Some(content))
    }
}

fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}{}", color.to_fg_str(), text, RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_uppercases_without_escapes() {
        let policy = ColorPolicy::new(ColorMode::Production);
        assert_eq!(policy.colorize("info", None), "INFO");
        assert_eq!(policy.colorize("custom", None), "CUSTOM");
        assert_eq!(policy.level(LogLevel::Warn), "WARN");
    }

    #[test]
    fn test_production_timestamp_is_raw_content() {
        let policy = ColorPolicy::new(ColorMode::Production);
        assert_eq!(policy.timestamp("01/02, 03:04:05"), "01/02, 03:04:05");
        assert_eq!(policy.colorize("TimeStamp", Some("x")), "x");
        assert_eq!(policy.colorize("timestamp", None), "");
    }

    #[test]
    fn test_interactive_level_colors() {
        let policy = ColorPolicy::new(ColorMode::Interactive);
        assert_eq!(policy.level(LogLevel::Info), "\x1b[92mINFO\x1b[0m");
        assert_eq!(policy.level(LogLevel::Debug), "\x1b[95mDEBUG\x1b[0m");
        assert_eq!(policy.level(LogLevel::Warn), "\x1b[93mWARN\x1b[0m");
        assert_eq!(policy.level(LogLevel::Error), "\x1b[91mERROR\x1b[0m");
    }

    #[test]
    fn test_interactive_matching_ignores_case() {
        let policy = ColorPolicy::new(ColorMode::Interactive);
        assert_eq!(policy.colorize("ErRoR", None), "\x1b[91mERROR\x1b[0m");
    }

    #[test]
    fn test_unknown_label_falls_back_to_cyan() {
        let policy = ColorPolicy::new(ColorMode::Interactive);
        assert_eq!(policy.colorize("verbose", None), "\x1b[36mVERBOSE\x1b[0m");
        assert_eq!(policy.colorize("warning", None), "\x1b[36mWARNING\x1b[0m");
    }

    #[test]
    fn test_interactive_timestamp_uses_content() {
        let policy = ColorPolicy::new(ColorMode::Interactive);
        let styled = policy.timestamp("03/11, 09:05:00");
        assert_eq!(styled, "\x1b[45;97m03/11, 09:05:00\x1b[0m");
        assert!(!styled.contains("TIMESTAMP"));
    }

    #[test]
    fn test_mode_from_env_value() {
        assert_eq!(ColorMode::from_env_value(Some("production")), ColorMode::Production);
        assert_eq!(ColorMode::from_env_value(Some(" PRODUCTION ")), ColorMode::Production);
        assert_eq!(ColorMode::from_env_value(Some("development")), ColorMode::Interactive);
        assert_eq!(ColorMode::from_env_value(None), ColorMode::Interactive);
    }
}
