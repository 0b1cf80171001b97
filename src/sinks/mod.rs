//! Sink implementations

pub mod console;
pub mod memory;
pub mod rotating_file;

pub use console::ConsoleSink;
pub use memory::{CapturedLine, MemoryBuffer, MemorySink};
pub use rotating_file::{DailyRotatingFileSink, FileRole, RetentionPolicy};

pub use crate::core::Sink;
