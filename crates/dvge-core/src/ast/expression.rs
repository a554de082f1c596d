//! Expression AST nodes

use super::operator::{Operator, UnaryOperator};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
///
/// The grammar has no attribute access, assignment or imports; the only
/// names an expression can reach are literals and catalog functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Bare identifier that is not a literal keyword
    Identifier(String),

    /// List literal (e.g., `[1, 2, 3]`)
    List(Vec<Expression>),

    /// Map literal with string keys (e.g., `{"hp": 10}`)
    Map(Vec<(String, Expression)>),

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Chained comparison `a < b <= c`; each operand is evaluated at most once
    Compare {
        first: Box<Expression>,
        rest: Vec<(Operator, Expression)>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Function call (e.g., `max(1, 2)`)
    FunctionCall { name: String, args: Vec<Expression> },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create an identifier expression
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a comparison chain
    pub fn compare(first: Expression, rest: Vec<(Operator, Expression)>) -> Self {
        Expression::Compare {
            first: Box::new(first),
            rest,
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a function call expression
    pub fn function_call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Visit every function call in the tree, outermost first
    pub fn visit_calls<'a>(&'a self, visit: &mut dyn FnMut(&'a str, usize)) {
        match self {
            Expression::Literal(_) | Expression::Identifier(_) => {}
            Expression::List(items) => items.iter().for_each(|item| item.visit_calls(visit)),
            Expression::Map(entries) => entries.iter().for_each(|(_, v)| v.visit_calls(visit)),
            Expression::Binary { left, right, .. } => {
                left.visit_calls(visit);
                right.visit_calls(visit);
            }
            Expression::Compare { first, rest } => {
                first.visit_calls(visit);
                rest.iter().for_each(|(_, operand)| operand.visit_calls(visit));
            }
            Expression::Unary { operand, .. } => operand.visit_calls(visit),
            Expression::FunctionCall { name, args } => {
                visit(name, args.len());
                args.iter().for_each(|arg| arg.visit_calls(visit));
            }
        }
    }
}
