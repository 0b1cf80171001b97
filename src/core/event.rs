//! Log payloads and their normalization into events
//!
//! Applications hand the logger a [`Payload`]. Before anything is rendered it
//! is classified into exactly one [`LogEvent`] shape. Classification runs an
//! ordered list of classifiers and takes the first match:
//!
//! 1. error-like (an error value, or a map carrying string `message` and `stack`)
//! 2. message record (a map with a string `message` field)
//! 3. structured value (everything else, inspected eagerly)
//!
//! The last classifier accepts any data payload, so classification is total.

use super::inspect::{inspect, Field, InspectOptions, Value};
use serde::Serialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::error::Error as StdError;

/// An error with an optional stack trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error value.
    ///
    /// The stack trace starts with `Error: <message>`, lists each source as
    /// `caused by: <source>`, and ends with the captured backtrace when
    /// backtraces are enabled (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let message = err.to_string();
        let mut stack = format!("Error: {}", message);

        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            for frame in backtrace.to_string().lines() {
                stack.push_str("\n    ");
                stack.push_str(frame.trim_start());
            }
        }

        Self {
            message,
            stack: Some(stack),
        }
    }
}

/// Raw input to [`crate::Logger::log`]
#[derive(Debug, Clone)]
pub enum Payload {
    Error(ErrorPayload),
    Data(Value),
}

impl Payload {
    /// Wrap an error value, see [`ErrorPayload::from_error`]
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        Payload::Error(ErrorPayload::from_error(err))
    }

    /// Convert any serializable value. A value that fails to serialize is
    /// logged as a string describing the failure.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Payload::Data(Value::from(json)),
            Err(e) => Payload::Data(Value::Str(format!("<unserializable value: {}>", e))),
        }
    }

    /// A message record: a map holding only a string `message` field
    pub fn message(text: impl Into<String>) -> Self {
        Payload::Data(Value::Map(vec![Field::new("message", Value::Str(text.into()))]))
    }
}

/// A bare string is logged as a message record
impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::message(text)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::message(text)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Data(value)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(json: serde_json::Value) -> Self {
        Payload::Data(Value::from(json))
    }
}

impl From<ErrorPayload> for Payload {
    fn from(err: ErrorPayload) -> Self {
        Payload::Error(err)
    }
}

/// Normalized shape of a single log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Message { text: String },
    Structured { rendered: String },
    Error { message: String, stack_trace: String },
}

type Classifier = fn(&Payload, &InspectOptions) -> Option<LogEvent>;

/// Classifiers in priority order
const CLASSIFIERS: [Classifier; 3] = [classify_error, classify_message, classify_structured];

impl LogEvent {
    /// Classify with the default inspection settings (depth 1, hidden fields shown)
    pub fn classify(payload: &Payload) -> LogEvent {
        Self::classify_with(payload, &InspectOptions::default())
    }

    pub fn classify_with(payload: &Payload, options: &InspectOptions) -> LogEvent {
        CLASSIFIERS
            .iter()
            .find_map(|classifier| classifier(payload, options))
            .unwrap_or_else(|| LogEvent::Structured {
                rendered: "undefined".to_string(),
            })
    }

    /// The text that follows the `[LEVEL] ` tag of a rendered line
    pub fn body(&self) -> Cow<'_, str> {
        match self {
            LogEvent::Message { text } => Cow::Borrowed(text),
            LogEvent::Structured { rendered } => Cow::Borrowed(rendered),
            LogEvent::Error {
                message,
                stack_trace,
            } => Cow::Owned(format!("{}\n  {}\n", message, stack_trace)),
        }
    }
}

fn classify_error(payload: &Payload, _options: &InspectOptions) -> Option<LogEvent> {
    match payload {
        Payload::Error(err) => Some(LogEvent::Error {
            message: err.message.clone(),
            stack_trace: err
                .stack
                .clone()
                .unwrap_or_else(|| format!("Error: {}", err.message)),
        }),
        Payload::Data(value) => {
            let message = value.str_field("message")?;
            let stack_trace = value.str_field("stack")?;
            Some(LogEvent::Error {
                message,
                stack_trace,
            })
        }
    }
}

fn classify_message(payload: &Payload, _options: &InspectOptions) -> Option<LogEvent> {
    match payload {
        Payload::Data(value) => value
            .str_field("message")
            .map(|text| LogEvent::Message { text }),
        Payload::Error(_) => None,
    }
}

fn classify_structured(payload: &Payload, options: &InspectOptions) -> Option<LogEvent> {
    match payload {
        Payload::Data(value) => Some(LogEvent::Structured {
            rendered: inspect(value, options),
        }),
        Payload::Error(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inspect::SharedValue;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection reset")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl StdError for Inner {}

    #[test]
    fn test_error_payload_classifies_as_error() {
        let payload = Payload::from(ErrorPayload::new("boom").with_stack("at main"));
        let event = LogEvent::classify(&payload);
        assert_eq!(
            event,
            LogEvent::Error {
                message: "boom".to_string(),
                stack_trace: "at main".to_string()
            }
        );
        assert_eq!(event.body(), "boom\n  at main\n");
    }

    #[test]
    fn test_error_without_stack_still_renders() {
        let event = LogEvent::classify(&Payload::from(ErrorPayload::new("boom")));
        assert_eq!(event.body(), "boom\n  Error: boom\n");
    }

    #[test]
    fn test_from_error_walks_source_chain() {
        let payload = Payload::from_error(&Outer(Inner));
        let LogEvent::Error {
            message,
            stack_trace,
        } = LogEvent::classify(&payload)
        else {
            panic!("expected error event");
        };
        assert_eq!(message, "request failed");
        assert!(stack_trace.starts_with("Error: request failed\n    caused by: connection reset"));
    }

    #[test]
    fn test_error_like_map_wins_over_message() {
        let value = Value::object([
            ("message", Value::from("boom")),
            ("stack", Value::from("at handler")),
            ("code", Value::Int(500)),
        ]);
        let event = LogEvent::classify(&Payload::from(value));
        assert_eq!(event.body(), "boom\n  at handler\n");
    }

    #[test]
    fn test_string_message_field() {
        let event = LogEvent::classify(&Payload::from("hello"));
        assert_eq!(
            event,
            LogEvent::Message {
                text: "hello".to_string()
            }
        );

        let value = Value::object([("message", Value::from("hello")), ("user", Value::Int(1))]);
        assert_eq!(LogEvent::classify(&Payload::from(value)).body(), "hello");
    }

    #[test]
    fn test_non_string_message_inspects_whole_value() {
        let value = Value::object([("message", Value::Int(42)), ("ok", Value::Bool(false))]);
        let event = LogEvent::classify(&Payload::from(value));
        assert_eq!(
            event,
            LogEvent::Structured {
                rendered: "{ message: 42, ok: false }".to_string()
            }
        );
    }

    #[test]
    fn test_plain_object_is_structured() {
        let event = LogEvent::classify(&Payload::from(serde_json::json!({"a": 1, "b": 2})));
        assert_eq!(event.body(), "{ a: 1, b: 2 }");
    }

    #[test]
    fn test_primitives_are_structured() {
        assert_eq!(LogEvent::classify(&Payload::from(Value::Null)).body(), "null");
        assert_eq!(LogEvent::classify(&Payload::from(Value::Int(3))).body(), "3");
        assert_eq!(
            LogEvent::classify(&Payload::from(Value::from("raw"))).body(),
            "'raw'"
        );
    }

    #[test]
    fn test_cyclic_payload_does_not_hang() {
        let node = SharedValue::new(Value::Null);
        node.set(Value::object([("self", Value::Shared(node.clone()))]));
        let event = LogEvent::classify(&Payload::from(Value::Shared(node.clone())));
        assert_eq!(event.body(), "{ self: [Circular] }");
        node.set(Value::Null);
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Order {
            id: u32,
            items: Vec<&'static str>,
        }

        let payload = Payload::from_serialize(&Order {
            id: 7,
            items: vec!["tea"],
        });
        assert_eq!(
            LogEvent::classify(&payload).body(),
            "{ id: 7, items: [ 'tea' ] }"
        );
    }
}
