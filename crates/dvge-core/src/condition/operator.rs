//! Operator names accepted in condition records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator applied by a condition record
///
/// Resolved once from the record's operator name. Names outside the closed
/// set become [`ConditionOperator::Unrecognized`], which is evaluated as
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionOperator {
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Logical
    And,
    Or,
    Not,

    // String predicates
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    Length,
    Empty,
    NotEmpty,

    // Collection predicates
    In,
    NotIn,
    Has,
    Count,
    Any,
    All,

    /// Unknown operator name; evaluates as `==`
    Unrecognized(String),
}

impl ConditionOperator {
    /// Resolve an operator from its name
    pub fn parse(name: &str) -> Self {
        match name {
            "==" => ConditionOperator::Eq,
            "!=" => ConditionOperator::Ne,
            "<" => ConditionOperator::Lt,
            "<=" => ConditionOperator::Le,
            ">" => ConditionOperator::Gt,
            ">=" => ConditionOperator::Ge,
            "+" => ConditionOperator::Add,
            "-" => ConditionOperator::Sub,
            "*" => ConditionOperator::Mul,
            "/" => ConditionOperator::Div,
            "%" => ConditionOperator::Mod,
            "**" => ConditionOperator::Pow,
            "and" => ConditionOperator::And,
            "or" => ConditionOperator::Or,
            "not" => ConditionOperator::Not,
            "contains" => ConditionOperator::Contains,
            "starts_with" => ConditionOperator::StartsWith,
            "ends_with" => ConditionOperator::EndsWith,
            "matches" => ConditionOperator::Matches,
            "length" => ConditionOperator::Length,
            "empty" => ConditionOperator::Empty,
            "not_empty" => ConditionOperator::NotEmpty,
            "in" => ConditionOperator::In,
            "not_in" => ConditionOperator::NotIn,
            "has" => ConditionOperator::Has,
            "count" => ConditionOperator::Count,
            "any" => ConditionOperator::Any,
            "all" => ConditionOperator::All,
            other => ConditionOperator::Unrecognized(other.to_string()),
        }
    }

    /// Operator name as written in condition records
    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::Eq => "==",
            ConditionOperator::Ne => "!=",
            ConditionOperator::Lt => "<",
            ConditionOperator::Le => "<=",
            ConditionOperator::Gt => ">",
            ConditionOperator::Ge => ">=",
            ConditionOperator::Add => "+",
            ConditionOperator::Sub => "-",
            ConditionOperator::Mul => "*",
            ConditionOperator::Div => "/",
            ConditionOperator::Mod => "%",
            ConditionOperator::Pow => "**",
            ConditionOperator::And => "and",
            ConditionOperator::Or => "or",
            ConditionOperator::Not => "not",
            ConditionOperator::Contains => "contains",
            ConditionOperator::StartsWith => "starts_with",
            ConditionOperator::EndsWith => "ends_with",
            ConditionOperator::Matches => "matches",
            ConditionOperator::Length => "length",
            ConditionOperator::Empty => "empty",
            ConditionOperator::NotEmpty => "not_empty",
            ConditionOperator::In => "in",
            ConditionOperator::NotIn => "not_in",
            ConditionOperator::Has => "has",
            ConditionOperator::Count => "count",
            ConditionOperator::Any => "any",
            ConditionOperator::All => "all",
            ConditionOperator::Unrecognized(name) => name,
        }
    }

    /// Operators that only look at the variable operand
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            ConditionOperator::Not
                | ConditionOperator::Length
                | ConditionOperator::Empty
                | ConditionOperator::NotEmpty
                | ConditionOperator::Count
                | ConditionOperator::Any
                | ConditionOperator::All
        )
    }
}

impl Default for ConditionOperator {
    fn default() -> Self {
        ConditionOperator::Eq
    }
}

impl From<String> for ConditionOperator {
    fn from(name: String) -> Self {
        ConditionOperator::parse(&name)
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a list of conditions is combined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Logic {
    And,
    Or,
    /// Any other mode; evaluated as AND
    Unrecognized(String),
}

impl Logic {
    /// Resolve a logic mode, case-insensitively
    pub fn parse(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "AND" => Logic::And,
            "OR" => Logic::Or,
            _ => Logic::Unrecognized(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
            Logic::Unrecognized(name) => name,
        }
    }
}

impl Default for Logic {
    fn default() -> Self {
        Logic::And
    }
}

impl From<String> for Logic {
    fn from(name: String) -> Self {
        Logic::parse(&name)
    }
}

impl From<&str> for Logic {
    fn from(name: &str) -> Self {
        Logic::parse(name)
    }
}

impl From<Logic> for String {
    fn from(logic: Logic) -> Self {
        logic.as_str().to_string()
    }
}
