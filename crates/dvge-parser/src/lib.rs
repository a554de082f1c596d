//! DVGE Parser - Expression parser for DVGE scripting
//!
//! This crate turns author-written expression text into the restricted AST
//! defined in `dvge-core`, and locates `${name}` interpolation markers.

pub mod error;
pub mod expression_parser;
pub mod interpolation;
pub mod lexer;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::{ExpressionParser, DEFAULT_MAX_DEPTH};
