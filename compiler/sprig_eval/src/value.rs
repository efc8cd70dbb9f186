//! Runtime values.

use std::fmt;
use std::sync::Arc;

use crate::heap::ObjectId;

/// A value the language can produce or hold.
///
/// Primitives are stored inline. Tables, arrays, functions and handles live
/// in the interpreter heap and are shared by [`ObjectId`].
#[derive(Clone, PartialEq)]
pub enum Value {
    /// "No value": the result of a declaration without an initializer.
    Void,
    Null,
    Boolean(bool),
    Number(f64),
    String(Arc<str>),
    Object(ObjectId),
}

impl Value {
    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Value::String(text.into())
    }

    #[inline]
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `null` or `void`.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Void)
    }

    /// The display name of a primitive; `None` for objects.
    pub fn primitive_name(&self) -> Option<&'static str> {
        match self {
            Value::Void => Some("void"),
            Value::Null => Some("null"),
            Value::Boolean(_) => Some("Boolean"),
            Value::Number(_) => Some("Number"),
            Value::String(_) => Some("String"),
            Value::Object(_) => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", sprig_ir::format_number(*n)),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Object(id) => write!(f, "{id:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into())
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Value::Object(value)
    }
}
