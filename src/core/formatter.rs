//! Line formatting
//!
//! Every line has the same shape regardless of event kind:
//!
//! ```text
//! [<prefix> ]<timestamp>: [<LEVEL>] <body>
//! ```

use super::color::{ColorMode, ColorPolicy};
use super::event::LogEvent;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormatter;
use chrono::{Datelike, Local, Timelike};

/// Composes timestamp, colored level tag and event body into one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineFormatter {
    colors: ColorPolicy,
    timestamps: TimestampFormatter,
}

impl LineFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            colors: ColorPolicy::new(mode),
            timestamps: TimestampFormatter,
        }
    }

    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.colors.mode()
    }

    /// Render with the current local time
    #[must_use]
    pub fn render(&self, prefix: &str, level: LogLevel, event: &LogEvent) -> String {
        self.render_at(prefix, level, event, &Local::now())
    }

    /// Render with an explicit instant
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_logger::core::{ColorMode, LineFormatter, LogEvent, LogLevel};
    /// use chrono::NaiveDate;
    ///
    /// let at = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap().and_hms_opt(10, 30, 45).unwrap();
    /// let event = LogEvent::Message { text: "ready".to_string() };
    /// let line = LineFormatter::new(ColorMode::Production).render_at("API", LogLevel::Info, &event, &at);
    /// assert_eq!(line, "API 08/01, 10:30:45: [INFO] ready");
    /// ```
    #[must_use]
    pub fn render_at<T: Datelike + Timelike>(
        &self,
        prefix: &str,
        level: LogLevel,
        event: &LogEvent,
        instant: &T,
    ) -> String {
        let body = event.body();
        let mut line = String::with_capacity(prefix.len() + body.len() + 48);

        if !prefix.is_empty() {
            line.push_str(prefix);
            line.push(' ');
        }
        line.push_str(&self.colors.timestamp(&self.timestamps.format(instant)));
        line.push_str(": [");
        line.push_str(&self.colors.level(level));
        line.push_str("] ");
        line.push_str(&body);

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 3)
            .and_then(|d| d.and_hms_opt(h, mi, s))
            .expect("valid datetime")
    }

    fn message(text: &str) -> LogEvent {
        LogEvent::Message {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_message_line_without_prefix() {
        let formatter = LineFormatter::new(ColorMode::Production);
        let line = formatter.render_at("", LogLevel::Info, &message("hello"), &at(9, 5, 0));
        assert_eq!(line, "03/11, 09:05:00: [INFO] hello");
    }

    #[test]
    fn test_prefix_is_followed_by_space() {
        let formatter = LineFormatter::new(ColorMode::Production);
        let line = formatter.render_at("APP", LogLevel::Warn, &message("low disk"), &at(9, 5, 0));
        assert_eq!(line, "APP 03/11, 09:05:00: [WARN] low disk");
    }

    #[test]
    fn test_error_event_body() {
        let formatter = LineFormatter::new(ColorMode::Production);
        let event = LogEvent::Error {
            message: "boom".to_string(),
            stack_trace: "Error: boom\n    at main".to_string(),
        };
        let line = formatter.render_at("", LogLevel::Error, &event, &at(12, 0, 1));
        assert_eq!(line, "03/11, 12:00:01: [ERROR] boom\n  Error: boom\n    at main\n");
    }

    #[test]
    fn test_structured_event_body() {
        let formatter = LineFormatter::new(ColorMode::Production);
        let event = LogEvent::Structured {
            rendered: "{ a: 1 }".to_string(),
        };
        let line = formatter.render_at("", LogLevel::Debug, &event, &at(1, 2, 3));
        assert_eq!(line, "03/11, 01:02:03: [DEBUG] { a: 1 }");
    }

    #[test]
    fn test_production_has_no_escapes() {
        let formatter = LineFormatter::new(ColorMode::Production);
        let line = formatter.render("", LogLevel::Error, &message("x"));
        assert!(line.contains("[ERROR] x"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_interactive_line_is_colored() {
        let formatter = LineFormatter::new(ColorMode::Interactive);
        let line = formatter.render_at("APP", LogLevel::Error, &message("x"), &at(9, 5, 0));
        assert_eq!(
            line,
            "APP \x1b[45;97m03/11, 09:05:00\x1b[0m: [\x1b[91mERROR\x1b[0m] x"
        );
    }

    #[test]
    fn test_only_timestamp_differs_between_instants() {
        let formatter = LineFormatter::new(ColorMode::Interactive);
        let event = message("same");
        let first = formatter.render_at("P", LogLevel::Info, &event, &at(9, 5, 0));
        let second = formatter.render_at("P", LogLevel::Info, &event, &at(17, 45, 59));
        assert_ne!(first, second);
        assert_eq!(first.replace("09:05:00", "17:45:59"), second);
    }
}
