//! Runtime error types

use dvge_core::CoreError;
use dvge_parser::ParseError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Expression text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Value had the wrong type for a built-in
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Name outside the symbol table
    #[error("Undefined name: {0}")]
    UndefinedName(String),

    /// Call to a function that is not in the catalog
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Call with the wrong number of arguments
    #[error("Function '{function}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Regular expression failed to compile
    #[error("Invalid regex: {0}")]
    InvalidRegex(String),

    /// Math function argument outside its domain
    #[error("Math domain error: {0}")]
    MathDomain(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
