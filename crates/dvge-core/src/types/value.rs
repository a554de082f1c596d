//! Runtime value types for DVGE scripting
//!
//! The `Value` enum represents every value a condition or expression can
//! produce. It mirrors JSON, except that integers and floats are kept apart
//! so numeric coercion can choose between them.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    /// Name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Truthiness: null, false, zero and empty containers are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for integers, floats and booleans
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_) | Value::Bool(_))
    }

    /// Numeric view of the value. Booleans count as 0 and 1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Integer view of the value (integers and booleans only)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric view, or a type error naming the actual type
    pub fn expect_number(&self) -> Result<f64> {
        self.as_f64().ok_or_else(|| {
            CoreError::TypeError(format!("expected number, got {}", self.type_name()))
        })
    }

    /// Integer view; whole floats are accepted
    pub fn expect_integer(&self) -> Result<i64> {
        match self {
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
            Value::Float(f) => Err(CoreError::InvalidValue(format!("{} is not an integer", f))),
            other => other.as_i64().ok_or_else(|| {
                CoreError::TypeError(format!("expected integer, got {}", other.type_name()))
            }),
        }
    }

    /// List view, or a type error naming the actual type
    pub fn expect_array(&self) -> Result<&[Value]> {
        self.as_array().ok_or_else(|| {
            CoreError::TypeError(format!("expected list, got {}", self.type_name()))
        })
    }

    /// Convert from a `serde_json::Value`
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert into a `serde_json::Value`. Non-finite floats become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Display form used for string coercion and text substitution.
///
/// Floats always carry a decimal point (`75.0`), so the number coercion can
/// tell them apart from integers by their string form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());

        assert!(Value::Integer(-3).is_truthy());
        assert!(Value::String("x".to_string()).is_truthy());
        assert!(Value::Array(vec![Value::Null]).is_truthy());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Float(75.0).to_string(), "75.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Integer(75).to_string(), "75");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::String("Alice".to_string()).to_string(), "Alice");
        assert_eq!(
            Value::Array(vec![Value::Integer(1), Value::String("a".to_string())]).to_string(),
            r#"[1,"a"]"#
        );
    }

    #[test]
    fn test_value_serde_json_distinguishes_numbers() {
        let val: Value = serde_json::from_str("[1, 2.5, true, null]").unwrap();
        assert_eq!(
            val,
            Value::Array(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::Bool(true),
                Value::Null,
            ])
        );
    }

    #[test]
    fn test_value_json_conversion() {
        let json = serde_json::json!({"hp": 75, "name": "Alice", "tags": ["a", "b"]});
        let val = Value::from_json(json.clone());

        match &val {
            Value::Object(map) => {
                assert_eq!(map.get("hp"), Some(&Value::Integer(75)));
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
            }
            _ => panic!("Expected Object"),
        }
        assert_eq!(val.to_json(), json);
    }

    #[test]
    fn test_value_numeric_views() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::Integer(4).as_f64(), Some(4.0));
        assert_eq!(Value::String("4".to_string()).as_f64(), None);
        assert_eq!(Value::Float(4.0).as_i64(), None);
    }

    #[test]
    fn test_value_expect_helpers() {
        assert_eq!(Value::Integer(3).expect_number().unwrap(), 3.0);
        assert_eq!(Value::Float(4.0).expect_integer().unwrap(), 4);
        assert!(matches!(
            Value::Float(4.5).expect_integer(),
            Err(CoreError::InvalidValue(_))
        ));

        let err = Value::String("x".to_string()).expect_number().unwrap_err();
        assert_eq!(err.to_string(), "Type error: expected number, got string");
        assert!(Value::Null.expect_array().is_err());
    }
}
