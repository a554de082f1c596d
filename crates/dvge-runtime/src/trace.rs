//! Condition evaluation traces
//!
//! Traces record the coerced operands and outcome of each condition so an
//! editor can show authors why a branch was or wasn't taken.

use dvge_core::Value;
use serde::{Deserialize, Serialize};

/// Trace of a single condition evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTrace {
    /// Readable form of the condition (e.g. "hp >= 50")
    pub expression: String,

    /// The coerced variable value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_value: Option<Value>,

    /// Operator name as written in the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// The coerced comparison value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_value: Option<Value>,

    /// Whether the record asked for negation
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negated: bool,

    /// Final boolean result, after negation
    pub result: bool,

    /// Why the operator failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Conditions combined by a logic group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<ConditionTrace>>,

    /// Logic of the group ("AND" or "OR")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl ConditionTrace {
    /// Create a new simple condition trace
    pub fn new(expression: String, result: bool) -> Self {
        Self {
            expression,
            left_value: None,
            operator: None,
            right_value: None,
            negated: false,
            result,
            error: None,
            nested: None,
            group_type: None,
        }
    }

    /// Create a binary condition trace with left/right values
    pub fn binary(
        expression: String,
        left_value: Value,
        operator: &str,
        right_value: Value,
        result: bool,
    ) -> Self {
        Self {
            left_value: Some(left_value),
            operator: Some(operator.to_string()),
            right_value: Some(right_value),
            ..Self::new(expression, result)
        }
    }

    /// Create a logic group trace
    pub fn group(group_type: &str, nested: Vec<ConditionTrace>, result: bool) -> Self {
        Self {
            nested: Some(nested),
            group_type: Some(group_type.to_string()),
            ..Self::new(format!("{}:[...]", group_type), result)
        }
    }

    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
