//! Comparison operator execution

use crate::error::{Result, RuntimeError};
use dvge_core::ast::Operator;
use dvge_core::Value;
use std::cmp::Ordering;

/// Numeric-aware equality: `1 == 1.0 == true`, containers compared element-wise
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => l == r,
        (l, r) if l.is_numeric() && r.is_numeric() => l.as_f64() == r.as_f64(),
        (Value::Null, Value::Null) => true,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| loose_eq(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| loose_eq(a, b)))
        }
        _ => false,
    }
}

/// Ordering between two values, if they are comparable
///
/// Numbers compare numerically, strings lexicographically and lists
/// element by element.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Some(l.cmp(r)),
        (l, r) if l.is_numeric() && r.is_numeric() => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (Value::Array(l), Value::Array(r)) => {
            for (a, b) in l.iter().zip(r) {
                match compare_values(a, b)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(l.len().cmp(&r.len()))
        }
        _ => None,
    }
}

/// Membership test behind `in`: list items, substrings and object keys
pub fn contains_item(item: &Value, container: &Value) -> Result<bool> {
    match (item, container) {
        (_, Value::Array(items)) => Ok(items.iter().any(|v| loose_eq(v, item))),
        (Value::String(needle), Value::String(haystack)) => Ok(haystack.contains(needle.as_str())),
        (Value::String(key), Value::Object(map)) => Ok(map.contains_key(key)),
        (_, Value::Object(_)) => Ok(false),
        _ => Err(RuntimeError::TypeError(format!(
            "'in' requires a list, string or object on the right, got {} in {}",
            item.type_name(),
            container.type_name()
        ))),
    }
}

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    let ordered = |accept: fn(Ordering) -> bool| -> Result<bool> {
        compare_values(left, right).map(accept).ok_or_else(|| {
            RuntimeError::InvalidOperation(format!(
                "Cannot compare {} and {} with {}",
                left.type_name(),
                right.type_name(),
                op
            ))
        })
    };

    match op {
        Operator::Eq => Ok(loose_eq(left, right)),
        Operator::Ne => Ok(!loose_eq(left, right)),
        Operator::Lt => ordered(Ordering::is_lt),
        Operator::Le => ordered(Ordering::is_le),
        Operator::Gt => ordered(Ordering::is_gt),
        Operator::Ge => ordered(Ordering::is_ge),
        Operator::In => contains_item(left, right),
        Operator::NotIn => contains_item(left, right).map(|found| !found),
        other => Err(RuntimeError::InvalidOperation(format!(
            "{} is not a comparison operator",
            other
        ))),
    }
}
