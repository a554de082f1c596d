//! In-memory variable and flag store
//!
//! `VariableSystem` owns the game's variables and flags. It is the store
//! the evaluators fall back to, applies variable effects from dialogue
//! nodes, and fills `{...}` placeholders in dialogue text.

use crate::context::{VariableContext, VariableStore};
use crate::error::{Result, RuntimeError};
use crate::expression::ExpressionEvaluator;
use crate::operators::{compare_values, execute_binary_op};
use dvge_core::ast::Operator;
use dvge_core::Value;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// A variable system shared between the editor and the evaluators
pub type SharedVariables = Arc<RwLock<VariableSystem>>;

static NAME_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern must compile"));

static MATH_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{=([^}]+)\}").expect("math pattern must compile"));

static CONDITIONAL_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^?}]+)\?([^:}]*):([^}]*)\}").expect("conditional pattern must compile")
});

static BARE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[^\W\d]\w*\b").expect("name pattern must compile"));

/// Operation applied by a variable effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectOp {
    #[serde(rename = "=")]
    Set,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Sub,
    #[serde(rename = "*=")]
    Mul,
    #[serde(rename = "/=")]
    Div,
    #[serde(rename = "%=")]
    Mod,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
}

impl EffectOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectOp::Set => "=",
            EffectOp::Add => "+=",
            EffectOp::Sub => "-=",
            EffectOp::Mul => "*=",
            EffectOp::Div => "/=",
            EffectOp::Mod => "%=",
            EffectOp::Min => "min",
            EffectOp::Max => "max",
        }
    }
}

impl FromStr for EffectOp {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "=" => Ok(EffectOp::Set),
            "+=" => Ok(EffectOp::Add),
            "-=" => Ok(EffectOp::Sub),
            "*=" => Ok(EffectOp::Mul),
            "/=" => Ok(EffectOp::Div),
            "%=" => Ok(EffectOp::Mod),
            "min" => Ok(EffectOp::Min),
            "max" => Ok(EffectOp::Max),
            other => Err(RuntimeError::InvalidOperation(format!(
                "Unknown effect operation: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EffectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variables and flags with effect and text substitution support
#[derive(Debug, Clone, Default)]
pub struct VariableSystem {
    variables: HashMap<String, Value>,
    flags: HashMap<String, bool>,
    evaluator: ExpressionEvaluator,
}

impl VariableSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `evaluator` for `{= expr}` and `{cond ? a : b}` placeholders
    pub fn with_evaluator(mut self, evaluator: ExpressionEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Replace the placeholder evaluator of a system that is already shared
    pub fn set_evaluator(&mut self, evaluator: ExpressionEvaluator) {
        self.evaluator = evaluator;
    }

    /// Wrap for sharing with evaluators
    pub fn into_shared(self) -> SharedVariables {
        Arc::new(RwLock::new(self))
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn remove_flag(&mut self, name: &str) -> Option<bool> {
        self.flags.remove(name)
    }

    /// Replace all variables
    pub fn replace_variables(&mut self, variables: HashMap<String, Value>) {
        self.variables = variables;
    }

    /// Replace all flags
    pub fn replace_flags(&mut self, flags: HashMap<String, bool>) {
        self.flags = flags;
    }

    pub fn clear(&mut self) {
        self.variables.clear();
        self.flags.clear();
    }

    /// Variables and flags as one evaluation context; variables win on clashes
    pub fn to_context(&self) -> VariableContext {
        let mut context: VariableContext = self
            .flags
            .iter()
            .map(|(name, value)| (name.clone(), Value::Bool(*value)))
            .collect();
        context.extend(self.variables.iter().map(|(k, v)| (k.clone(), v.clone())));
        context
    }

    /// Evaluate a math expression that names variables as `{name}`
    pub fn try_evaluate_math(&self, expression: &str) -> Result<Value> {
        let source = NAME_PLACEHOLDER.replace_all(expression, |caps: &Captures<'_>| {
            if self.variables.contains_key(&caps[1]) || self.flags.contains_key(&caps[1]) {
                format!("${{{}}}", &caps[1])
            } else {
                caps[0].to_string()
            }
        });

        match self.evaluator.try_evaluate(&source, &self.to_context())? {
            value @ (Value::Integer(_) | Value::Float(_)) => Ok(value),
            Value::Bool(b) => Ok(Value::Integer(i64::from(b))),
            other => Err(RuntimeError::TypeError(format!(
                "math expression produced {}",
                other.type_name()
            ))),
        }
    }

    /// Evaluate a math expression; failures evaluate to 0
    pub fn evaluate_math_expression(&self, expression: &str) -> Value {
        self.try_evaluate_math(expression).unwrap_or_else(|e| {
            tracing::debug!("Math expression '{}' failed, using 0: {}", expression, e);
            Value::Integer(0)
        })
    }

    /// Evaluate a `{cond ? a : b}` condition; bare variable and flag names are in scope
    pub fn evaluate_text_condition(&self, condition: &str) -> bool {
        let source = BARE_NAME.replace_all(condition, |caps: &Captures<'_>| {
            let name = &caps[0];
            if self.variables.contains_key(name) || self.flags.contains_key(name) {
                format!("${{{}}}", name)
            } else {
                name.to_string()
            }
        });

        match self.evaluator.try_evaluate(&source, &self.to_context()) {
            Ok(value) => value.is_truthy(),
            Err(e) => {
                tracing::debug!("Text condition '{}' failed, using false: {}", condition, e);
                false
            }
        }
    }

    /// Fill placeholders in dialogue text
    ///
    /// `{name}` becomes the variable's display form or a flag's
    /// `true`/`false`, `{= expr}` the result of a math expression and
    /// `{cond ? a : b}` one of the two branches. Unknown `{name}`s are kept.
    pub fn substitute_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = NAME_PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
            if let Some(value) = self.variables.get(&caps[1]) {
                value.to_string()
            } else if let Some(flag) = self.flags.get(&caps[1]) {
                flag.to_string()
            } else {
                caps[0].to_string()
            }
        });

        let text = MATH_PLACEHOLDER.replace_all(&text, |caps: &Captures<'_>| {
            render_number(&self.evaluate_math_expression(&caps[1]))
        });

        let text = CONDITIONAL_PLACEHOLDER.replace_all(&text, |caps: &Captures<'_>| {
            if self.evaluate_text_condition(caps[1].trim()) {
                caps[2].trim().to_string()
            } else {
                caps[3].trim().to_string()
            }
        });

        text.into_owned()
    }

    /// Apply an effect to a variable and return its new value
    ///
    /// A missing variable starts at 0. String values are parsed as numbers,
    /// or evaluated as math when they are not plain numbers. Dividing
    /// by zero leaves the variable unchanged. On error the variable keeps its
    /// previous value.
    pub fn apply_effect(&mut self, name: &str, op: EffectOp, value: impl Into<Value>) -> Result<Value> {
        let current = self
            .variables
            .get(name)
            .cloned()
            .unwrap_or(Value::Integer(0));

        let operand = match value.into() {
            Value::String(text) => self.effect_operand(&text)?,
            other => other,
        };

        let updated = match op {
            EffectOp::Set => operand,
            EffectOp::Add => execute_binary_op(&current, &Operator::Add, &operand)?,
            EffectOp::Sub => execute_binary_op(&current, &Operator::Sub, &operand)?,
            EffectOp::Mul => execute_binary_op(&current, &Operator::Mul, &operand)?,
            EffectOp::Div | EffectOp::Mod if operand.as_f64() == Some(0.0) => {
                tracing::debug!("Ignoring {} 0 on '{}'", op, name);
                return Ok(current);
            }
            EffectOp::Div => execute_binary_op(&current, &Operator::Div, &operand)?,
            EffectOp::Mod => execute_binary_op(&current, &Operator::Mod, &operand)?,
            EffectOp::Min | EffectOp::Max => {
                let wanted = if op == EffectOp::Min {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
                match compare_values(&operand, &current) {
                    Some(order) if order == wanted => operand,
                    Some(_) => current,
                    None => {
                        return Err(RuntimeError::TypeError(format!(
                            "{} cannot compare {} and {}",
                            op,
                            operand.type_name(),
                            current.type_name()
                        )))
                    }
                }
            }
        };

        let updated = collapse_whole_float(updated);
        tracing::debug!("Effect {} {} => {}", name, op, updated);
        self.variables.insert(name.to_string(), updated.clone());
        Ok(updated)
    }

    fn effect_operand(&self, text: &str) -> Result<Value> {
        if !text.contains('{') {
            let trimmed = text.trim();
            let parsed = if trimmed.contains('.') {
                trimmed.parse::<f64>().ok().map(Value::Float)
            } else {
                trimmed.parse::<i64>().ok().map(Value::Integer)
            };
            if let Some(number) = parsed {
                return Ok(number);
            }
        }
        self.try_evaluate_math(text)
    }
}

impl VariableStore for VariableSystem {
    fn variables(&self) -> Option<&HashMap<String, Value>> {
        Some(&self.variables)
    }

    fn flags(&self) -> Option<&HashMap<String, bool>> {
        Some(&self.flags)
    }
}

fn collapse_whole_float(value: Value) -> Value {
    match value {
        Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 9.0e15 => {
            Value::Integer(x as i64)
        }
        other => other,
    }
}

/// Whole floats render without a fractional part
fn render_number(value: &Value) -> String {
    collapse_whole_float(value.clone()).to_string()
}
