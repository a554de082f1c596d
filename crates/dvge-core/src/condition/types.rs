//! Condition record types

use super::operator::ConditionOperator;
use crate::types::{DataType, Value};
use serde::{Deserialize, Serialize};

/// Prefix marking a condition value as a reference to another variable
pub const VARIABLE_REFERENCE_PREFIX: char = '$';

/// A structured boolean test over a named variable
///
/// Condition records are authored in the editor and stored in scene and
/// dialogue files. Missing fields take the editor defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Name of the variable under test
    #[serde(default)]
    pub variable: String,

    /// Comparison value: a literal, or `$name` to reference another variable
    #[serde(default = "default_value")]
    pub value: Value,

    /// Operator applied to the variable and the value
    #[serde(default)]
    pub operator: ConditionOperator,

    /// Type both operands are coerced to
    #[serde(default)]
    pub data_type: DataType,

    /// Invert the result
    #[serde(default)]
    pub negated: bool,
}

fn default_value() -> Value {
    Value::String(String::new())
}

impl Condition {
    /// Create a condition with the default operator (`==`) and data type (`string`)
    pub fn new(variable: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
            operator: ConditionOperator::default(),
            data_type: DataType::default(),
            negated: false,
        }
    }

    /// Set the operator
    pub fn with_operator(mut self, operator: ConditionOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Set the data type
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Set negation
    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// Name of the referenced variable if the value is `$name`
    pub fn value_reference(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => s.strip_prefix(VARIABLE_REFERENCE_PREFIX),
            _ => None,
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::new(String::new(), default_value())
    }
}
