//! Depth-bounded inspection of arbitrary structured values
//!
//! [`Value`] models whatever shape an application hands to the logger:
//! scalars, lists, maps whose fields may be hidden, and shared nodes that can
//! form cycles. [`inspect`] renders it on one line, collapsing containers below
//! the configured depth and printing `[Circular]` for a node that is already
//! being rendered further up the tree.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Placeholder for a map nested deeper than the inspection depth
pub const OBJECT_PLACEHOLDER: &str = "[Object]";
/// Placeholder for a list nested deeper than the inspection depth
pub const ARRAY_PLACEHOLDER: &str = "[Array]";
/// Placeholder for a reference back to an enclosing shared node
pub const CIRCULAR_PLACEHOLDER: &str = "[Circular]";

/// Arbitrarily shaped data
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Vec<Field>),
    Shared(SharedValue),
}

/// A named map entry. Hidden fields mirror non-enumerable properties: they
/// are only rendered when [`InspectOptions::show_hidden`] is set.
#[derive(Debug, Clone)]
pub struct Field {
    pub key: String,
    pub value: Value,
    pub hidden: bool,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            hidden: false,
        }
    }

    pub fn hidden(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            hidden: true,
        }
    }
}

/// A reference-counted node. Cloning shares the node, so a value may contain
/// itself.
#[derive(Clone, Default)]
pub struct SharedValue(Arc<RwLock<Value>>);

impl SharedValue {
    pub fn new(value: Value) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Replace the node's content
    pub fn set(&self, value: Value) {
        *self.0.write() = value;
    }

    fn id(&self) -> *const RwLock<Value> {
        Arc::as_ptr(&self.0)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedValue({:p})", self.id())
    }
}

impl Value {
    /// Build a map from visible key/value pairs
    pub fn object<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(pairs.into_iter().map(|(k, v)| Field::new(k, v)).collect())
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Look up a string-typed field, following shared nodes at the top level.
    ///
    /// Returns `None` when the value is not a map, the field is missing, or
    /// the field holds anything other than a string.
    pub fn str_field(&self, key: &str) -> Option<String> {
        let mut node = match self {
            Value::Shared(shared) => shared.clone(),
            other => return other.own_str_field(key),
        };

        let mut seen = Vec::new();
        loop {
            if seen.contains(&node.id()) {
                return None;
            }
            seen.push(node.id());
            let next = match &*node.0.read() {
                Value::Shared(next) => next.clone(),
                other => return other.own_str_field(key),
            };
            node = next;
        }
    }

    fn own_str_field(&self, key: &str) -> Option<String> {
        match self {
            Value::Map(fields) => fields
                .iter()
                .find(|field| field.key == key)
                .and_then(|field| match &field.value {
                    Value::Str(s) => Some(s.clone()),
                    _ => None,
                }),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<SharedValue> for Value {
    fn from(shared: SharedValue) -> Self {
        Value::Shared(shared)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| Field::new(k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Inspection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Deepest nesting level whose containers are expanded; the top-level
    /// value is level 0
    pub depth: usize,
    /// Render hidden fields as `[key]: value`
    pub show_hidden: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            show_hidden: true,
        }
    }
}

/// Render `value` as a single human-readable line.
///
/// # Examples
///
/// ```
/// use prefix_logger::core::{inspect, InspectOptions, Value};
///
/// let value = Value::object([("a", Value::Int(1)), ("b", Value::from("x"))]);
/// assert_eq!(inspect(&value, &InspectOptions::default()), "{ a: 1, b: 'x' }");
/// ```
#[must_use]
pub fn inspect(value: &Value, options: &InspectOptions) -> String {
    let mut out = String::new();
    let mut ancestors = Vec::new();
    write_value(&mut out, value, 0, options, &mut ancestors);
    out
}

fn write_value(
    out: &mut String,
    value: &Value,
    level: usize,
    options: &InspectOptions,
    ancestors: &mut Vec<*const RwLock<Value>>,
) {
    match value {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::Str(s) => push_quoted(out, s),
        Value::List(items) => {
            if items.is_empty() {
                out.push_str("[]");
            } else if level > options.depth {
                out.push_str(ARRAY_PLACEHOLDER);
            } else {
                out.push_str("[ ");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_value(out, item, level + 1, options, ancestors);
                }
                out.push_str(" ]");
            }
        }
        Value::Map(fields) => {
            let visible: Vec<&Field> = fields
                .iter()
                .filter(|field| options.show_hidden || !field.hidden)
                .collect();
            if visible.is_empty() {
                out.push_str("{}");
            } else if level > options.depth {
                out.push_str(OBJECT_PLACEHOLDER);
            } else {
                out.push_str("{ ");
                for (i, field) in visible.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if field.hidden {
                        out.push('[');
                        push_key(out, &field.key);
                        out.push(']');
                    } else {
                        push_key(out, &field.key);
                    }
                    out.push_str(": ");
                    write_value(out, &field.value, level + 1, options, ancestors);
                }
                out.push_str(" }");
            }
        }
        Value::Shared(shared) => {
            // Nodes that directly wrap other nodes are followed iteratively
            let base = ancestors.len();
            let mut node = shared.clone();
            loop {
                let id = node.id();
                if ancestors.contains(&id) {
                    out.push_str(CIRCULAR_PLACEHOLDER);
                    break;
                }
                ancestors.push(id);

                let inner = node.0.read();
                if let Value::Shared(next) = &*inner {
                    let next = next.clone();
                    drop(inner);
                    node = next;
                    continue;
                }
                write_value(out, &inner, level, options, ancestors);
                break;
            }
            ancestors.truncate(base);
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let label = if f > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else {
        f.to_string()
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn push_key(out: &mut String, key: &str) {
    let is_identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        out.push_str(key);
    } else {
        push_quoted(out, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &Value) -> String {
        inspect(value, &InspectOptions::default())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render(&Value::Null), "null");
        assert_eq!(render(&Value::Undefined), "undefined");
        assert_eq!(render(&Value::Bool(true)), "true");
        assert_eq!(render(&Value::Int(-7)), "-7");
        assert_eq!(render(&Value::Float(1.5)), "1.5");
        assert_eq!(render(&Value::Float(f64::NAN)), "NaN");
        assert_eq!(render(&Value::Float(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(render(&Value::from("it's")), "'it\\'s'");
    }

    #[test]
    fn test_flat_object() {
        let value = Value::object([("a", 1), ("b", 2)]);
        assert_eq!(render(&value), "{ a: 1, b: 2 }");
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render(&Value::Map(Vec::new())), "{}");
        assert_eq!(render(&Value::List(Vec::new())), "[]");
    }

    #[test]
    fn test_nesting_beyond_depth_collapses() {
        let value = Value::object([(
            "a",
            Value::object([(
                "b",
                Value::object([("c", 1)]),
            )]),
        )]);
        assert_eq!(render(&value), "{ a: { b: [Object] } }");

        let value = Value::object([("xs", Value::list([Value::list([1, 2])]))]);
        assert_eq!(render(&value), "{ xs: [ [Array] ] }");
    }

    #[test]
    fn test_deeper_options_expand_more() {
        let value = Value::object([("a", Value::object([("b", Value::object([("c", 1)]))]))]);
        let options = InspectOptions {
            depth: 2,
            show_hidden: true,
        };
        assert_eq!(inspect(&value, &options), "{ a: { b: { c: 1 } } }");
    }

    #[test]
    fn test_hidden_fields() {
        let value = Value::Map(vec![Field::new("visible", 1), Field::hidden("secret", "s")]);
        assert_eq!(render(&value), "{ visible: 1, [secret]: 's' }");

        let options = InspectOptions {
            depth: 1,
            show_hidden: false,
        };
        assert_eq!(inspect(&value, &options), "{ visible: 1 }");
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let value = Value::object([("content-type", "json")]);
        assert_eq!(render(&value), "{ 'content-type': 'json' }");
    }

    #[test]
    fn test_self_reference_is_circular() {
        let node = SharedValue::new(Value::Null);
        node.set(Value::object([
            ("name", Value::from("root")),
            ("me", Value::Shared(node.clone())),
        ]));
        assert_eq!(
            render(&Value::Shared(node.clone())),
            "{ name: 'root', me: [Circular] }"
        );
        // break the cycle so the node is freed
        node.set(Value::Null);
    }

    #[test]
    fn test_repeated_sibling_reference_is_not_circular() {
        let leaf = SharedValue::new(Value::Int(5));
        let value = Value::list([Value::Shared(leaf.clone()), Value::Shared(leaf)]);
        assert_eq!(render(&value), "[ 5, 5 ]");
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": 1, "b": [true, null], "c": 2.5});
        let value = Value::from(json);
        assert_eq!(render(&value), "{ a: 1, b: [ true, null ], c: 2.5 }");
    }

    #[test]
    fn test_str_field() {
        let value = Value::object([("message", Value::from("hi")), ("code", Value::Int(3))]);
        assert_eq!(value.str_field("message").as_deref(), Some("hi"));
        assert_eq!(value.str_field("code"), None);
        assert_eq!(Value::Int(1).str_field("message"), None);

        let shared = SharedValue::new(value);
        assert_eq!(Value::Shared(shared).str_field("message").as_deref(), Some("hi"));
    }

    /// Builds `depth` distinct nodes, each wrapping the next, ending in `leaf`.
    /// Returns every node so the chain can be dismantled without deep drops.
    fn wrapped_chain(depth: usize, leaf: Value) -> Vec<SharedValue> {
        let mut nodes: Vec<SharedValue> = Vec::with_capacity(depth);
        let mut inner = leaf;
        for _ in 0..depth {
            let node = SharedValue::new(inner);
            inner = Value::Shared(node.clone());
            nodes.push(node);
        }
        nodes.reverse();
        nodes
    }

    fn dismantle(nodes: &[SharedValue]) {
        for node in nodes {
            node.set(Value::Null);
        }
    }

    #[test]
    fn test_long_chain_of_wrapped_nodes() {
        let nodes = wrapped_chain(50_000, Value::object([("message", Value::from("deep"))]));
        let outer = Value::Shared(nodes[0].clone());

        assert_eq!(render(&outer), "{ message: 'deep' }");
        assert_eq!(outer.str_field("message").as_deref(), Some("deep"));

        dismantle(&nodes);
    }

    #[test]
    fn test_wrapped_chain_closing_on_itself() {
        let nodes = wrapped_chain(3, Value::Null);
        nodes[2].set(Value::Shared(nodes[0].clone()));
        let outer = Value::Shared(nodes[0].clone());

        assert_eq!(render(&outer), "[Circular]");
        assert_eq!(outer.str_field("message"), None);

        dismantle(&nodes);
    }

    #[test]
    fn test_wrapped_node_inside_object_keeps_depth() {
        let nodes = wrapped_chain(4, Value::object([("x", Value::Int(1))]));
        let value = Value::object([("wrapped", Value::Shared(nodes[0].clone()))]);
        assert_eq!(render(&value), "{ wrapped: { x: 1 } }");
    }
}
