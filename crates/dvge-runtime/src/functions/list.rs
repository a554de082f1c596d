//! Collection built-ins

use crate::error::Result;
use crate::operators::contains_item;
use dvge_core::Value;

/// `item` is a member of `collection`
pub fn is_in(item: &Value, collection: &Value) -> Result<bool> {
    contains_item(item, collection)
}

pub fn not_in(item: &Value, collection: &Value) -> Result<bool> {
    contains_item(item, collection).map(|found| !found)
}

/// `collection` contains `item`
pub fn has(collection: &Value, item: &Value) -> Result<bool> {
    contains_item(item, collection)
}

/// Number of elements, characters or keys; 0 for scalars
pub fn count(collection: &Value) -> i64 {
    let len = match collection {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        Value::Object(map) => map.len(),
        _ => 0,
    };
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Any element truthy; scalars use their own truthiness
pub fn any(collection: &Value) -> bool {
    match collection {
        Value::Array(items) => items.iter().any(Value::is_truthy),
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => map.keys().any(|key| !key.is_empty()),
        scalar => scalar.is_truthy(),
    }
}

/// Every element truthy; empty collections are vacuously true
pub fn all(collection: &Value) -> bool {
    match collection {
        Value::Array(items) => items.iter().all(Value::is_truthy),
        Value::String(_) => true,
        Value::Object(map) => map.keys().all(|key| !key.is_empty()),
        scalar => scalar.is_truthy(),
    }
}
