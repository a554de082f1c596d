//! Free-form expression evaluation
//!
//! Evaluation runs in three steps:
//! 1. `${name}` markers are replaced by literal tokens of the resolved values
//! 2. function calls pass through unchanged (catalog names are already valid)
//! 3. the text is parsed and interpreted against the function catalog

use super::interpolate::interpolate;
use super::interpreter::Interpreter;
use crate::context::{VariableContext, VariableResolver, VariableStore};
use crate::error::Result;
use crate::functions::{CallEnv, Clock, SystemClock};
use crate::options::EvaluatorOptions;
use dvge_core::ast::Expression;
use dvge_core::Value;
use dvge_parser::ParseError;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Evaluates author expressions
#[derive(Clone)]
pub struct ExpressionEvaluator {
    store: Option<Arc<dyn VariableStore>>,
    options: EvaluatorOptions,
    clock: Arc<dyn Clock>,
}

impl Default for ExpressionEvaluator {
    fn default() -> Self {
        Self {
            store: None,
            options: EvaluatorOptions::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl fmt::Debug for ExpressionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionEvaluator")
            .field("has_store", &self.store.is_some())
            .field("options", &self.options)
            .field("clock", &self.clock)
            .finish()
    }
}

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator that falls back to `store` for names missing from the context
    pub fn with_store(store: Arc<dyn VariableStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: EvaluatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the clock read by `now`, `today`, `age` and `days_since`
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// Evaluate an expression; failures are logged and read as `false`
    pub fn evaluate(&self, text: &str, context: &VariableContext) -> Value {
        match self.try_evaluate(text, context) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Error evaluating expression '{}': {}", text, e);
                Value::Bool(false)
            }
        }
    }

    /// Evaluate an expression, returning the failure reason
    pub fn try_evaluate(&self, text: &str, context: &VariableContext) -> Result<Value> {
        let expr = self.compile(text, context)?;
        let env = CallEnv {
            clock: self.clock.as_ref(),
            options: &self.options,
        };
        let value = Interpreter::new(env).eval(&expr)?;
        tracing::debug!("Expression '{}' => {:?}", text, value);
        Ok(value)
    }

    /// Interpolate and parse without executing
    pub fn compile(&self, text: &str, context: &VariableContext) -> Result<Expression> {
        let resolver = VariableResolver::new(context, self.store.as_deref());
        let interpolated = interpolate(text, &resolver);
        let source = rewrite_function_calls(&interpolated);

        if source.len() > self.options.max_expression_length {
            return Err(ParseError::TooLong {
                length: source.len(),
                max_length: self.options.max_expression_length,
            }
            .into());
        }

        Ok(self.options.parser().parse_str(&source)?)
    }
}

/// Function-call rewriting step; catalog names are already callable as written
fn rewrite_function_calls(source: &str) -> Cow<'_, str> {
    Cow::Borrowed(source)
}
