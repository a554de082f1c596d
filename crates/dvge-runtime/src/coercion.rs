//! Type coercion for condition operands
//!
//! Both operands of a condition are coerced to the record's data type before
//! the operator runs. Coercion never fails: a value that cannot be converted
//! is returned unchanged.

use dvge_core::{DataType, Value};
use std::collections::HashMap;

/// Tokens the boolean coercion treats as true (compared lowercase)
pub const TRUTHY_TOKENS: [&str; 4] = ["true", "yes", "1", "on"];

/// Coerce a value to the given data type
pub fn coerce(value: Value, data_type: &DataType) -> Value {
    match data_type {
        DataType::Number => to_number(value),
        DataType::Boolean => Value::Bool(to_boolean(&value)),
        DataType::String => to_string(value),
        DataType::List => to_list(value),
        DataType::Object => to_object(value),
        DataType::Unrecognized(name) => {
            tracing::debug!("Unrecognized data type '{}', passing value through", name);
            value
        }
    }
}

/// Integer or float chosen by the presence of `.` in the string form
fn to_number(value: Value) -> Value {
    match value {
        Value::Integer(_) | Value::Float(_) => value,
        Value::Bool(b) => Value::Integer(i64::from(b)),
        Value::String(s) => {
            let text = s.trim();
            let parsed = if text.contains('.') {
                text.parse::<f64>().ok().map(Value::Float)
            } else {
                text.parse::<i64>().ok().map(Value::Integer)
            };
            match parsed {
                Some(number) => number,
                None => {
                    tracing::debug!("Cannot coerce {:?} to number, passing through", s);
                    Value::String(s)
                }
            }
        }
        other => {
            tracing::debug!("Cannot coerce {} to number, passing through", other.type_name());
            other
        }
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => TRUTHY_TOKENS.contains(&s.to_lowercase().as_str()),
        other => other.is_truthy(),
    }
}

fn to_string(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        other => Value::String(other.to_string()),
    }
}

/// JSON first, then comma-split for strings; keys for objects; scalars wrapped
fn to_list(value: Value) -> Value {
    match value {
        Value::Array(_) => value,
        Value::String(s) => match serde_json::from_str::<serde_json::Value>(&s) {
            Ok(json) => Value::from_json(json),
            Err(_) => Value::Array(
                s.split(',')
                    .map(|part| Value::String(part.to_string()))
                    .collect(),
            ),
        },
        Value::Object(map) => {
            let mut keys: Vec<String> = map.into_keys().collect();
            keys.sort();
            Value::Array(keys.into_iter().map(Value::String).collect())
        }
        scalar => Value::Array(vec![scalar]),
    }
}

/// JSON first for strings, falling back to `{"value": s}`
fn to_object(value: Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<serde_json::Value>(&s) {
            Ok(json) => Value::from_json(json),
            Err(_) => {
                let mut map = HashMap::new();
                map.insert("value".to_string(), Value::String(s));
                Value::Object(map)
            }
        },
        other => other,
    }
}
