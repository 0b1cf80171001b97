//! Sink contract for log output destinations

use super::ansi::strip_ansi;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::router::SinkScope;
use parking_lot::Mutex;
use std::borrow::Cow;

/// A destination for formatted lines.
///
/// `write` receives one complete line without a trailing newline; the sink
/// adds whatever separator its medium needs.
pub trait Sink: Send {
    fn write(&mut self, level: LogLevel, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Static configuration a sink is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Lines below this level are dropped by the sink
    pub min_level: LogLevel,
    pub scope: SinkScope,
    /// Remove ANSI color escapes before writing
    pub strip_colors: bool,
}

impl SinkConfig {
    /// Colorized, every level
    #[must_use]
    pub fn console() -> Self {
        Self {
            min_level: LogLevel::Debug,
            scope: SinkScope::AllEvents,
            strip_colors: false,
        }
    }

    /// Uncolored, every level
    #[must_use]
    pub fn file() -> Self {
        Self {
            min_level: LogLevel::Debug,
            scope: SinkScope::AllEvents,
            strip_colors: true,
        }
    }

    /// Uncolored, errors only
    #[must_use]
    pub fn error_file() -> Self {
        Self {
            min_level: LogLevel::Error,
            scope: SinkScope::ErrorOnly,
            strip_colors: true,
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

/// A registered sink together with its configuration. Each handle locks
/// independently, so a slow sink only delays itself.
pub(crate) struct SinkHandle {
    name: String,
    config: SinkConfig,
    sink: Mutex<Box<dyn Sink>>,
}

impl SinkHandle {
    pub(crate) fn new(sink: Box<dyn Sink>, config: SinkConfig) -> Self {
        Self {
            name: sink.name().to_string(),
            config,
            sink: Mutex::new(sink),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Write one line, applying the sink's level filter and color stripping.
    ///
    /// Errors and panics raised by the sink are both turned into `Err`.
    pub(crate) fn deliver(&self, level: LogLevel, line: &str) -> Result<()> {
        if level < self.config.min_level {
            return Ok(());
        }

        let text: Cow<'_, str> = if self.config.strip_colors {
            Cow::Owned(strip_ansi(line))
        } else {
            Cow::Borrowed(line)
        };

        let mut sink = self.sink.lock();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(level, &text))) {
            Ok(result) => result,
            Err(panic_info) => Err(LoggerError::sink(
                self.name.clone(),
                format!("panicked: {}", panic_message(&*panic_info)),
            )),
        }
    }

    pub(crate) fn flush(&self) -> Result<()> {
        let mut sink = self.sink.lock();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush())) {
            Ok(result) => result,
            Err(panic_info) => Err(LoggerError::sink(
                self.name.clone(),
                format!("panicked during flush: {}", panic_message(&*panic_info)),
            )),
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
