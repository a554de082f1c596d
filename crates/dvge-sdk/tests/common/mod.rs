//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use dvge_sdk::{FixedClock, ScriptEngine, ScriptEngineBuilder, Value, VariableContext};
use std::sync::Arc;

/// Engine with a small tavern scene loaded and the clock frozen at 2024-03-15
pub fn tavern_engine() -> ScriptEngine {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default();
    ScriptEngineBuilder::new()
        .with_clock(Arc::new(FixedClock::at_date(today)))
        .with_variable("gold", 50)
        .with_variable("name", "Alice")
        .with_variable("inventory", Value::Array(vec!["key".into(), "map".into()]))
        .with_variable("birthday", "2000-06-01")
        .with_flag("met_innkeeper", true)
        .build()
}

/// Build a per-call context from pairs
pub fn context(pairs: &[(&str, Value)]) -> VariableContext {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
