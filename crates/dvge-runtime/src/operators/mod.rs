//! Operator execution modules
//!
//! Binary, comparison and unary operators shared by the expression
//! interpreter, plus the condition record operators built on top of them.

mod binary;
mod comparison;
mod condition;
mod unary;

pub(crate) use binary::{add, div, execute_binary_op, pow};
pub use comparison::{compare_values, contains_item, loose_eq};
pub(crate) use condition::execute_condition_op;
pub(crate) use unary::execute_unary_op;
