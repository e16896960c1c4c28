use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::NumberValue;

/// Variables passed to a message, keyed by name without the `$`.
pub type Args = HashMap<String, Value>;

/// A caller-defined value type that can be passed as a variable.
///
/// # Example
///
/// ```
/// use ftl::{CustomValue, Value};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Temperature(f64);
///
/// impl CustomValue for Temperature {
///     fn format(&self, _locale: &str) -> Option<String> {
///         Some(format!("{}°C", self.0))
///     }
/// }
///
/// let value = Value::Custom(Arc::new(Temperature(21.5)));
/// assert_eq!(value.format("en"), Some("21.5°C".to_string()));
/// ```
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Formats the value for display in `locale`.
    ///
    /// Returns `None` if the value cannot be interpolated into text; the
    /// resolver then reports an error and falls back to the debug form.
    fn format(&self, locale: &str) -> Option<String>;

    /// A short name for the type, used in error messages.
    fn type_name(&self) -> &'static str {
        "custom"
    }
}

/// A runtime value: a variable, a literal, or a function result.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Number(NumberValue),
    /// Renders as `true` or `false`.
    Bool(bool),
    Custom(Arc<dyn CustomValue>),
}

impl Value {
    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Format this value for interpolation into text.
    ///
    /// Returns `None` only for custom values that refuse to format.
    pub fn format(&self, locale: &str) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.format(locale)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Custom(custom) => custom.format(locale),
        }
    }

    /// The name of this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Custom(custom) => custom.type_name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(NumberValue::new(f64::from(n)))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(NumberValue::new(n as f64))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(NumberValue::new(f64::from(n)))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(NumberValue::new(n as f64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(NumberValue::new(n as f64))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(NumberValue::new(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(NumberValue::new(n))
    }
}

impl From<NumberValue> for Value {
    fn from(n: NumberValue) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
