//! Unary operator execution

use crate::error::{Result, RuntimeError};
use dvge_core::ast::UnaryOperator;
use dvge_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOperator::Negate, Value::Integer(n)) => Ok(n
            .checked_neg()
            .map(Value::Integer)
            .unwrap_or(Value::Float(-(*n as f64)))),
        (UnaryOperator::Negate, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOperator::Negate, Value::Bool(b)) => Ok(Value::Integer(-i64::from(*b))),
        (UnaryOperator::Plus, Value::Integer(_) | Value::Float(_)) => Ok(operand.clone()),
        (UnaryOperator::Plus, Value::Bool(b)) => Ok(Value::Integer(i64::from(*b))),
        _ => Err(RuntimeError::TypeError(format!(
            "bad operand type for unary {:?}: {}",
            op,
            operand.type_name()
        ))),
    }
}
