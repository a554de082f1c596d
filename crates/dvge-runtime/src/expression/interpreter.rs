//! Tree-walking interpreter for parsed expressions
//!
//! The only names in scope are the catalog functions. Bare identifiers are
//! undefined-name errors since all variables arrive through interpolation.

use crate::error::{Result, RuntimeError};
use crate::functions::{self, CallEnv};
use crate::operators::{execute_binary_op, execute_unary_op};
use dvge_core::ast::{Expression, Operator};
use dvge_core::Value;
use std::collections::HashMap;

/// Evaluates an expression tree against the function catalog
pub struct Interpreter<'a> {
    env: CallEnv<'a>,
}

impl<'a> Interpreter<'a> {
    pub fn new(env: CallEnv<'a>) -> Self {
        Self { env }
    }

    pub fn eval(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::Identifier(name) => Err(RuntimeError::UndefinedName(name.clone())),

            Expression::List(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),

            Expression::Map(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.eval(value)?)))
                .collect::<Result<HashMap<_, _>>>()
                .map(Value::Object),

            // `and` / `or` short-circuit and yield an operand
            Expression::Binary {
                left,
                op: Operator::And,
                right,
            } => {
                let left = self.eval(left)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                self.eval(right)
            }
            Expression::Binary {
                left,
                op: Operator::Or,
                right,
            } => {
                let left = self.eval(left)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.eval(right)
            }

            Expression::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                execute_binary_op(&left, op, &right)
            }

            // stops at the first false link; every operand is evaluated at most once
            Expression::Compare { first, rest } => {
                let mut left = self.eval(first)?;
                for (op, operand) in rest {
                    let right = self.eval(operand)?;
                    if !execute_binary_op(&left, op, &right)?.is_truthy() {
                        return Ok(Value::Bool(false));
                    }
                    left = right;
                }
                Ok(Value::Bool(true))
            }

            Expression::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                execute_unary_op(&operand, op)
            }

            Expression::FunctionCall { name, args } => {
                let function = functions::lookup(name)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>>>()?;
                function.call(&args, &self.env)
            }
        }
    }
}
