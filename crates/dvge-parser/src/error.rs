//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Expression text is empty or whitespace
    #[error("Empty expression")]
    EmptyExpression,

    /// Character that cannot start any token
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// String literal without a closing quote
    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// Numeric literal that does not fit the value types
    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    /// Token that does not fit the grammar at this point
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: usize,
    },

    /// Input ended while more tokens were required
    #[error("Unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// Nesting exceeds the configured depth limit
    #[error("Expression nesting exceeds maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },

    /// Expression text exceeds the configured length limit
    #[error("Expression length {length} exceeds maximum of {max_length}")]
    TooLong { length: usize, max_length: usize },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
