//! Formatting macros for the level methods.
//!
//! Each macro formats its arguments like `format!` and logs the result as a
//! plain message, so `info!(logger, "x = {}", x)` is shorthand for
//! `logger.info(format!("x = {}", x))`.
//!
//! # Examples
//!
//! ```
//! use prefix_logger::prelude::*;
//! use prefix_logger::{info, warn};
//!
//! let sink = MemorySink::new("capture");
//! let lines = sink.buffer();
//! let logger = Logger::builder()
//!     .color_mode(ColorMode::Production)
//!     .sink(sink, SinkConfig::file())
//!     .build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! warn!(logger, "{} retries left", 2);
//!
//! assert!(lines.lines()[0].ends_with("[INFO] listening on port 8080"));
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use prefix_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new("m"), SinkConfig::file()).build();
/// use prefix_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use prefix_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new("m"), SinkConfig::file()).build();
/// use prefix_logger::debug;
/// debug!(logger, "cache size: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// The message is logged as plain text; use [`crate::Payload::from_error`]
/// to keep an error's stack.
///
/// ```
/// # use prefix_logger::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new("m"), SinkConfig::file()).build();
/// use prefix_logger::error;
/// error!(logger, "upstream returned {}", 502);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{ColorMode, LogLevel, Logger, SinkConfig};
    use crate::sinks::{MemoryBuffer, MemorySink};

    fn capture() -> (Logger, MemoryBuffer) {
        let sink = MemorySink::new("mem");
        let buffer = sink.buffer();
        let logger = Logger::builder()
            .color_mode(ColorMode::Production)
            .sink(sink, SinkConfig::file())
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_log_macro() {
        let (logger, buffer) = capture();
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert!(buffer.lines()[0].ends_with(": [INFO] Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, buffer) = capture();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        let records = buffer.records();
        let levels: Vec<LogLevel> = records.iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
        assert!(records[2].line.ends_with("[WARN] Retry 1 of 3"));
        assert!(records[3].line.ends_with("[ERROR] Code: 500"));
    }

    #[test]
    fn test_macro_with_expressions() {
        let (logger, buffer) = capture();
        let user_id = 42;
        let action = "login";
        info!(logger, "User {} performed {}", user_id, action);
        assert!(buffer.lines()[0].ends_with("User 42 performed login"));
    }
}
