//! DVGE Core - Core types for the DVGE scripting system
//!
//! This crate provides the types shared by the parser, runtime and SDK:
//! - Value types for runtime data
//! - Condition records authored in the editor
//! - Expression AST definitions
//! - Error types

pub mod ast;
pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use condition::{Condition, ConditionOperator, Logic};
pub use error::CoreError;
pub use types::{DataType, Value};
