//! Abstract Syntax Tree for DVGE expressions

pub mod expression;
pub mod operator;

pub use expression::Expression;
pub use operator::{Operator, UnaryOperator};
