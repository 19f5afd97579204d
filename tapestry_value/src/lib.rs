//! Structured value model and canonicalizer for equivalence diffing.
//!
//! This crate provides:
//! - a value model (`Value`, `ValueKind`) for JSON-shaped data, including
//!   aliasable nodes (`Value::Shared`) that may form reference cycles
//! - a cycle-safe canonicalizer (`canonicalize`, `canonicalize_with`)
//! - a stable 2-space-indented serializer (`to_text`, `canonical_text`)
//!
//! Canonical form sorts object keys, resolves shared and external nodes, and
//! breaks reference cycles structurally instead of failing, so two values can
//! be compared for equivalence by diffing their serialized text line by line.
//!
//! # Example
//!
//! ```rust
//! use tapestry_value::{Value, canonical_text};
//!
//! let a = Value::Object(vec![
//!     ("b".to_string(), Value::from(2i64)),
//!     ("a".to_string(), Value::from(1i64)),
//! ]);
//! let b = Value::Object(vec![
//!     ("a".to_string(), Value::from(1i64)),
//!     ("b".to_string(), Value::from(2i64)),
//! ]);
//! assert_eq!(canonical_text(&a, None, None), canonical_text(&b, None, None));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

mod canonical;
mod text;

pub use canonical::{Replacer, canonicalize, canonicalize_with};
pub use text::{canonical_text, to_text};

/// Conversion seam for values that present themselves as plain data before
/// canonicalization.
///
/// The conversion runs first, before key sorting and descent. It is not
/// guarded: a panicking implementation propagates to the caller.
pub trait ToCanonical {
    /// Produce the plain-data representation to canonicalize instead of `self`.
    fn to_canonical(&self) -> Value;
}

/// A JSON-shaped value, extended with the two node kinds the wire format
/// cannot carry: an explicit missing-value marker and aliasable nodes.
#[derive(Clone)]
pub enum Value {
    /// Missing value. Dropped from objects and rendered as `null` in arrays
    /// during serialization, mirroring JSON text conventions.
    Undefined,
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value>),
    /// Object entries in insertion order; canonicalization sorts them.
    Object(Vec<(String, Value)>),
    /// Aliasable node. Two `Shared` handles cloned from the same `Rc` are the
    /// same node, which is how reference cycles are expressed.
    Shared(Rc<RefCell<Value>>),
    /// Deferred conversion through [`ToCanonical`].
    External(Rc<dyn ToCanonical>),
}

impl Value {
    /// Wrap a value in an aliasable shared node.
    pub fn shared(value: Value) -> Self {
        Value::Shared(Rc::new(RefCell::new(value)))
    }

    /// Classification used by diagnostics when dispatching on value shape.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Shared(cell) => cell.borrow().kind(),
            Value::External(ext) => ext.to_canonical().kind(),
        }
    }
}

/// Shape classification for a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(label)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(entries) => f.debug_tuple("Object").field(entries).finish(),
            // Shared nodes may be cyclic; print identity only.
            Value::Shared(cell) => write!(f, "Shared({:p})", Rc::as_ptr(cell)),
            Value::External(_) => f.write_str("External(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            // Pointer identity: structural comparison could recurse through a cycle.
            (Value::Shared(a), Value::Shared(b)) => Rc::ptr_eq(a, b),
            (Value::External(a), Value::External(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(serde_json::Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        // Non-finite numbers have no JSON representation and serialize as null.
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
