//! Condition record operator execution

use super::binary::execute_binary_op;
use super::comparison::{contains_item, execute_compare, loose_eq};
use crate::error::Result;
use crate::functions::{list, string};
use crate::options::EvaluatorOptions;
use dvge_core::ast::Operator;
use dvge_core::{ConditionOperator, Value};

/// Apply a condition operator to the coerced operands
///
/// Unary operators read only `left`. `in`/`not_in` against anything other
/// than a list or string yield false/true, and `has` on a scalar yields false.
pub(crate) fn execute_condition_op(
    left: &Value,
    op: &ConditionOperator,
    right: &Value,
    options: &EvaluatorOptions,
) -> Result<Value> {
    let fold = options.case_insensitive_strings;
    let value = match op {
        ConditionOperator::Eq => Value::Bool(execute_compare(left, &Operator::Eq, right)?),
        ConditionOperator::Ne => Value::Bool(execute_compare(left, &Operator::Ne, right)?),
        ConditionOperator::Lt => Value::Bool(execute_compare(left, &Operator::Lt, right)?),
        ConditionOperator::Le => Value::Bool(execute_compare(left, &Operator::Le, right)?),
        ConditionOperator::Gt => Value::Bool(execute_compare(left, &Operator::Gt, right)?),
        ConditionOperator::Ge => Value::Bool(execute_compare(left, &Operator::Ge, right)?),

        ConditionOperator::Add => execute_binary_op(left, &Operator::Add, right)?,
        ConditionOperator::Sub => execute_binary_op(left, &Operator::Sub, right)?,
        ConditionOperator::Mul => execute_binary_op(left, &Operator::Mul, right)?,
        ConditionOperator::Div => execute_binary_op(left, &Operator::Div, right)?,
        ConditionOperator::Mod => execute_binary_op(left, &Operator::Mod, right)?,
        ConditionOperator::Pow => execute_binary_op(left, &Operator::Pow, right)?,

        ConditionOperator::And => execute_binary_op(left, &Operator::And, right)?,
        ConditionOperator::Or => execute_binary_op(left, &Operator::Or, right)?,
        ConditionOperator::Not => Value::Bool(!left.is_truthy()),

        ConditionOperator::Contains => Value::Bool(string::contains(left, right, fold)),
        ConditionOperator::StartsWith => Value::Bool(string::starts_with(left, right, fold)),
        ConditionOperator::EndsWith => Value::Bool(string::ends_with(left, right, fold)),
        ConditionOperator::Matches => Value::Bool(string::matches(left, right)?),
        ConditionOperator::Length => Value::Integer(string::length(left)),
        ConditionOperator::Empty => Value::Bool(string::empty(left)),
        ConditionOperator::NotEmpty => Value::Bool(string::not_empty(left)),

        ConditionOperator::In => Value::Bool(match right {
            Value::Array(_) | Value::String(_) => contains_item(left, right)?,
            _ => false,
        }),
        ConditionOperator::NotIn => Value::Bool(match right {
            Value::Array(_) | Value::String(_) => !contains_item(left, right)?,
            _ => true,
        }),
        ConditionOperator::Has => Value::Bool(match left {
            Value::Array(_) | Value::String(_) => contains_item(right, left)?,
            _ => false,
        }),
        ConditionOperator::Count => Value::Integer(list::count(left)),
        ConditionOperator::Any => Value::Bool(list::any(left)),
        ConditionOperator::All => Value::Bool(list::all(left)),

        ConditionOperator::Unrecognized(name) => {
            tracing::debug!("Unrecognized operator '{}', falling back to equality", name);
            Value::Bool(loose_eq(left, right))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    fn apply(left: Value, op: &str, right: Value) -> Result<Value> {
        execute_condition_op(
            &left,
            &ConditionOperator::parse(op),
            &right,
            &EvaluatorOptions::default(),
        )
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(apply(75.into(), ">=", 50.into()).unwrap(), Value::Bool(true));
        assert_eq!(apply(75.into(), "<", 50.into()).unwrap(), Value::Bool(false));
        assert_eq!(apply(1.into(), "==", Value::Float(1.0)).unwrap(), Value::Bool(true));
        assert!(apply("a".into(), ">", 1.into()).is_err());
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(apply(7.into(), "%", 3.into()).unwrap(), Value::Integer(1));
        assert_eq!(apply(2.into(), "**", 3.into()).unwrap(), Value::Integer(8));
        assert_eq!(apply(1.into(), "/", 0.into()), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_unary_operators_ignore_right() {
        assert_eq!(apply("hello".into(), "length", "ignored".into()).unwrap(), Value::Integer(5));
        assert_eq!(apply(" ".into(), "empty", Value::Null).unwrap(), Value::Bool(true));
        assert_eq!(apply(Value::Bool(false), "not", Value::Bool(false)).unwrap(), Value::Bool(true));
        assert_eq!(
            apply(Value::Array(vec![1.into(), 0.into()]), "all", Value::Null).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_collection_operators() {
        let bag = Value::Array(vec!["key".into(), "map".into()]);
        assert_eq!(apply("key".into(), "in", bag.clone()).unwrap(), Value::Bool(true));
        assert_eq!(apply("key".into(), "in", 5.into()).unwrap(), Value::Bool(false));
        assert_eq!(apply("key".into(), "not_in", 5.into()).unwrap(), Value::Bool(true));
        assert_eq!(apply(bag, "has", "map".into()).unwrap(), Value::Bool(true));
        assert_eq!(apply(5.into(), "has", 5.into()).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_unknown_operator_is_equality() {
        assert_eq!(apply("x".into(), "~=", "x".into()).unwrap(), Value::Bool(true));
        assert_eq!(apply("x".into(), "~=", "y".into()).unwrap(), Value::Bool(false));
    }
}
