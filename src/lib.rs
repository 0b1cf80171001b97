//! # Prefix Logger
//!
//! A small leveled logger that writes every event to three places at once:
//! a colorized console, a daily `<project>.<date>.log` file, and a daily
//! `<project>.<date>.error.log` file that only receives errors.
//!
//! ## Features
//!
//! - **Prefixed lines**: `[prefix ]DD/MM, HH:MM:SS: [LEVEL] body`
//! - **Payload classification**: errors with stack traces, plain messages,
//!   and inspected structured values (cycle-safe, depth-limited)
//! - **Color modes**: interactive ANSI colors or plain production output,
//!   chosen from `APP_ENV` or explicitly
//! - **Daily rotation**: per-day files with retention and optional gzip
//! - **Isolated sinks**: a failing or panicking sink never affects the others
//!
//! ```no_run
//! use prefix_logger::{Logger, Payload};
//!
//! let logger = Logger::new("shop", "[api]").unwrap();
//! logger.info("listening on :8080");
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "database unreachable");
//! logger.error(Payload::from_error(&err));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ColorMode, ErrorPayload, Field, InspectOptions, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Payload, Result, SharedValue, Sink, SinkConfig,
        SinkScope, Value, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, DailyRotatingFileSink, FileRole, MemorySink, RetentionPolicy};
}

pub use crate::core::{
    ColorMode, ErrorPayload, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Payload, Result, Sink, SinkConfig, Value, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::{ConsoleSink, DailyRotatingFileSink, MemorySink};
