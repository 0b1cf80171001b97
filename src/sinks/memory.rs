//! In-memory sink capturing lines for inspection

use crate::core::{LogLevel, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// One captured write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub level: LogLevel,
    pub line: String,
}

/// Shared view of what a [`MemorySink`] captured. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    records: Arc<Mutex<Vec<CapturedLine>>>,
}

impl MemoryBuffer {
    pub fn records(&self) -> Vec<CapturedLine> {
        self.records.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.line.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

/// Keeps every line it receives in memory
pub struct MemorySink {
    name: String,
    buffer: MemoryBuffer,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: MemoryBuffer::default(),
        }
    }

    /// Handle for reading captured lines after the sink moves into a logger
    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, level: LogLevel, line: &str) -> Result<()> {
        self.buffer.records.lock().push(CapturedLine {
            level,
            line: line.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sees_writes() {
        let mut sink = MemorySink::new("mem");
        let buffer = sink.buffer();
        assert!(buffer.is_empty());

        sink.write(LogLevel::Warn, "first").unwrap();
        sink.write(LogLevel::Error, "second").unwrap();

        assert_eq!(buffer.lines(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(buffer.records()[1].level, LogLevel::Error);

        buffer.clear();
        assert_eq!(buffer.len(), 0);
    }
}
