//! Data type tags attached to condition records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target type both operands are coerced to before a condition is applied
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    Number,
    Boolean,
    String,
    List,
    Object,
    /// Any other tag. Values pass through coercion unchanged.
    Unrecognized(String),
}

impl DataType {
    /// Resolve a data type tag (exact, lowercase names)
    pub fn parse(name: &str) -> Self {
        match name {
            "number" => DataType::Number,
            "boolean" => DataType::Boolean,
            "string" => DataType::String,
            "list" => DataType::List,
            "object" => DataType::Object,
            other => DataType::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::String => "string",
            DataType::List => "list",
            DataType::Object => "object",
            DataType::Unrecognized(name) => name,
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::String
    }
}

impl From<String> for DataType {
    fn from(name: String) -> Self {
        DataType::parse(&name)
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.as_str().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
