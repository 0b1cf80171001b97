//! Console sink implementation

use crate::core::{LogLevel, LoggerError, Result, Sink};
use std::io::Write;

/// Writes each line to stdout, or stderr when built with [`ConsoleSink::stderr`]
pub struct ConsoleSink {
    use_stderr: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_stderr: false }
    }

    pub fn stderr() -> Self {
        Self { use_stderr: true }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        let result = if self.use_stderr {
            writeln!(std::io::stderr().lock(), "{}", line)
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)
        };
        result.map_err(|e| LoggerError::io_operation("writing to console", self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        if self.use_stderr {
            std::io::stderr().flush()?;
        } else {
            std::io::stdout().flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_write_and_flush() {
        let mut sink = ConsoleSink::new();
        sink.write(LogLevel::Info, "03/11, 09:05:00: [INFO] console test").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.name(), "console");
    }

    #[test]
    fn test_stderr_console() {
        let mut sink = ConsoleSink::stderr();
        sink.write(LogLevel::Error, "03/11, 09:05:00: [ERROR] stderr test").unwrap();
        sink.flush().unwrap();
    }
}
