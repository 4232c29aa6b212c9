//! core value type shared by the whole engine
//!
//! form data is JSON-compatible; coercion rules (truthiness, numeric
//! coercion, string rendering) match the host environment that owns the
//! form, so derived values round-trip through it unchanged.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// current form state: field name -> value, replaced wholesale each cycle
pub type FormData = HashMap<String, Value>;

/// a field value or comparison operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// explicit null
    Null,
    /// boolean value
    Bool(bool),
    /// numeric value (all arithmetic is double-precision)
    Number(f64),
    /// string value
    String(String),
    /// list of values (between pairs, subform data)
    List(Vec<Value>),
}

impl Value {
    /// try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// try to get as number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// try to get as list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// check if value is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            // lists are truthy even when empty
            Value::List(_) => true,
        }
    }

    /// numeric coercion: null and empty strings become 0, booleans 0/1,
    /// unparseable strings and lists with more than one element become NaN
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => parse_number(s),
            // lists coerce through their string form
            Value::List(_) => parse_number(&self.to_string()),
        }
    }

    /// string form when truthy, empty string otherwise
    pub fn text_or_empty(&self) -> String {
        if self.is_truthy() {
            self.to_string()
        } else {
            String::new()
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// render a number the way the host does: no trailing decimals on
/// integral values, named forms for the non-finite cases
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // covers negative zero
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// numeric coercion of a possibly-missing value; a missing field is NaN,
/// an explicit null is 0
pub fn number_of(value: Option<&Value>) -> f64 {
    match value {
        Some(v) => v.to_number(),
        None => f64::NAN,
    }
}

/// string coercion of a possibly-missing value, in the host's rendering
pub fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::List(l) => {
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // null elements render empty inside a list
                    if !matches!(v, Value::Null) {
                        write!(f, "{}", v)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
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
