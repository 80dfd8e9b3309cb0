//! # YQL Literal Formatting
//!
//! Leaf values in an expression are stored as a [`Value`] and turned into YQL
//! literal text by [`format_value`].
//!
//! | Value                     | Literal             |
//! |---------------------------|---------------------|
//! | `Value::Null`             | `null`              |
//! | `Value::String("it's")`   | `'it\'s'`           |
//! | `Value::Int(42)`          | `42`                |
//! | `Value::Float(100.0)`     | `100`               |
//! | `Value::Float(99.99)`     | `99.99`             |
//! | `Value::Float(f64::NAN)`  | `'NaN'`             |
//! | `Value::Bool(true)`       | `true`              |
//! | `Value::List([1, "a"])`   | `(1, 'a')`          |
//!
//! Only single quotes are escaped. Formatting never fails.

use std::fmt;

const LIST_SEPARATOR: &str = ", ";

/// A primitive (or list of primitives) used on the right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Build a value from anything displayable. It renders through the quoted string path.
    pub fn stringified(value: impl fmt::Display) -> Self {
        Self::String(value.to_string())
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items when every element of a list is a string.
    pub fn as_string_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::List(items) => items.iter().map(Value::as_str).collect(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                /// Values beyond `i64` become quoted strings.
                fn from(v: $ty) -> Self {
                    i64::try_from(v).map_or_else(|_| Value::stringified(v), Value::Int)
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        // Widening directly would turn 0.7f32 into 0.699999988079071.
        Value::Float(v.to_string().parse().unwrap_or(f64::from(v)))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Escape a string for use inside a single-quoted YQL literal.
///
/// # Examples
///
/// ```
/// use vespa_yql::value::escape_string;
///
/// assert_eq!(escape_string("it's"), "it\\'s");
/// assert_eq!(escape_string("plain"), "plain");
/// ```
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\'' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Render a value as a YQL literal.
///
/// # Examples
///
/// ```
/// use vespa_yql::value::{Value, format_value};
///
/// assert_eq!(format_value(&Value::from("nike")), "'nike'");
/// assert_eq!(format_value(&Value::from(4.5)), "4.5");
/// assert_eq!(format_value(&Value::from(vec!["a", "b"])), "('a', 'b')");
/// ```
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        // NaN and infinities have no numeric literal; they take the quoted fallback.
        Value::Float(f) if !f.is_finite() => quote(&f.to_string()),
        Value::Float(f) => f.to_string(),
        Value::String(s) => quote(s),
        Value::List(items) => format!("({})", join_literals(items)),
    }
}

/// Render the operand of `in` / `not in`. A scalar is wrapped as a one-element list.
pub fn format_in_values(value: &Value) -> String {
    match value {
        Value::List(_) => format_value(value),
        other => format!("({})", format_value(other)),
    }
}

pub(crate) fn quote(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

pub(crate) fn join_literals(items: &[Value]) -> String {
    items.iter().map(format_value).collect::<Vec<_>>().join(LIST_SEPARATOR)
}
