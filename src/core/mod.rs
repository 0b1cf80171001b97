//! Core logger types and traits

pub mod ansi;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod formatter;
pub mod inspect;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod router;
pub mod sink;
pub mod timestamp;

pub use ansi::strip_ansi;
pub use color::{ColorMode, ColorPolicy, ENVIRONMENT_VAR};
pub use config::{LoggerConfig, DEFAULT_LOG_DIR, DEFAULT_RETENTION_DAYS};
pub use error::{LoggerError, Result};
pub use event::{ErrorPayload, LogEvent, Payload};
pub use formatter::LineFormatter;
pub use inspect::{inspect, Field, InspectOptions, SharedValue, Value};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use router::{SeverityRouter, SinkId, SinkScope};
pub use sink::{Sink, SinkConfig};
pub use timestamp::TimestampFormatter;
