//! Severity-based routing of formatted lines to sinks

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Which events a sink is routed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkScope {
    /// Receives every line
    #[default]
    AllEvents,
    /// Receives only `Error` lines
    ErrorOnly,
}

impl SinkScope {
    #[must_use]
    pub fn accepts(&self, level: LogLevel) -> bool {
        match self {
            SinkScope::AllEvents => true,
            SinkScope::ErrorOnly => level == LogLevel::Error,
        }
    }
}

/// Position of a sink within a logger, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(pub usize);

/// Decides which registered sinks receive a line of a given level
#[derive(Debug, Clone, Default)]
pub struct SeverityRouter {
    scopes: Vec<SinkScope>,
}

impl SeverityRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink scope and return its id
    pub fn register(&mut self, scope: SinkScope) -> SinkId {
        self.scopes.push(scope);
        SinkId(self.scopes.len() - 1)
    }

    /// Sinks selected for `level`, in registration order
    #[must_use]
    pub fn route(&self, level: LogLevel) -> Vec<SinkId> {
        self.scopes
            .iter()
            .enumerate()
            .filter(|(_, scope)| scope.accepts(level))
            .map(|(idx, _)| SinkId(idx))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
