//! DVGE Runtime - Condition and expression evaluation for DVGE scripting
//!
//! This crate evaluates condition records and free-form author expressions
//! against per-call variables and an optional external variable store.

pub mod coercion;
pub mod condition_evaluator;
pub mod context;
pub mod error;
pub mod expression;
pub mod functions;
mod operators;
pub mod options;
pub mod trace;
pub mod validation;
pub mod variables;

// Re-export main types
pub use coercion::coerce;
pub use condition_evaluator::ConditionEvaluator;
pub use context::{VariableContext, VariableResolver, VariableStore};
pub use error::{Result, RuntimeError};
pub use expression::ExpressionEvaluator;
pub use functions::{list_functions, BuiltinFunction, Clock, FixedClock, SystemClock};
pub use operators::{compare_values, contains_item, loose_eq};
pub use options::EvaluatorOptions;
pub use trace::ConditionTrace;
pub use validation::{ExpressionValidator, ValidationReport};
pub use variables::{EffectOp, SharedVariables, VariableSystem};
