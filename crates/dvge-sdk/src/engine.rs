//! ScriptEngine - main entry point for DVGE scripting
//!
//! The engine owns the variable system and the evaluators that read from it.
//! Conditions and expressions see the shared variables as their store; the
//! per-call context still takes precedence.

use crate::builder::ScriptEngineBuilder;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use dvge_core::{Condition, Logic, Value};
use dvge_runtime::{
    ConditionEvaluator, ConditionTrace, EffectOp, ExpressionEvaluator, ExpressionValidator,
    SharedVariables, ValidationReport, VariableContext, VariableSystem,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLockReadGuard, RwLockWriteGuard};

/// A variable effect as stored on dialogue nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub variable: String,

    #[serde(default = "default_operation")]
    pub operation: EffectOp,

    #[serde(default = "default_effect_value")]
    pub value: Value,
}

fn default_operation() -> EffectOp {
    EffectOp::Set
}

fn default_effect_value() -> Value {
    Value::Integer(0)
}

/// Script engine for evaluating dialogue conditions and expressions
#[derive(Debug, Clone)]
pub struct ScriptEngine {
    config: EngineConfig,
    variables: SharedVariables,
    conditions: ConditionEvaluator,
    expressions: ExpressionEvaluator,
    validator: ExpressionValidator,
}

impl ScriptEngine {
    /// Create an engine with default settings and empty variables
    pub fn new() -> Self {
        ScriptEngineBuilder::new().build()
    }

    /// Start building an engine
    pub fn builder() -> ScriptEngineBuilder {
        ScriptEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        config: EngineConfig,
        variables: SharedVariables,
        conditions: ConditionEvaluator,
        expressions: ExpressionEvaluator,
        validator: ExpressionValidator,
    ) -> Self {
        Self {
            config,
            variables,
            conditions,
            expressions,
            validator,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle to the shared variable system
    pub fn variables(&self) -> SharedVariables {
        self.variables.clone()
    }

    // ========== Conditions ==========

    pub fn evaluate_condition(&self, condition: &Condition, context: &VariableContext) -> bool {
        self.conditions.evaluate_condition(condition, context)
    }

    pub fn evaluate_conditions(
        &self,
        conditions: &[Condition],
        logic: &Logic,
        context: &VariableContext,
    ) -> bool {
        self.conditions.evaluate_conditions(conditions, logic, context)
    }

    pub fn evaluate_condition_with_trace(
        &self,
        condition: &Condition,
        context: &VariableContext,
    ) -> ConditionTrace {
        self.conditions.evaluate_with_trace(condition, context)
    }

    pub fn evaluate_conditions_with_trace(
        &self,
        conditions: &[Condition],
        logic: &Logic,
        context: &VariableContext,
    ) -> ConditionTrace {
        self.conditions
            .evaluate_conditions_with_trace(conditions, logic, context)
    }

    // ========== Expressions ==========

    /// Evaluate an expression; failures are logged and read as `false`
    pub fn evaluate_expression(&self, text: &str, context: &VariableContext) -> Value {
        self.expressions.evaluate(text, context)
    }

    /// Evaluate an expression, surfacing the failure
    pub fn try_evaluate_expression(&self, text: &str, context: &VariableContext) -> Result<Value> {
        Ok(self.expressions.try_evaluate(text, context)?)
    }

    pub fn validate_expression(&self, text: &str) -> ValidationReport {
        self.validator.validate(text)
    }

    /// Signature to description for every built-in function
    pub fn list_functions(&self) -> BTreeMap<String, String> {
        dvge_runtime::list_functions()
    }

    // ========== Variables ==========

    pub fn set_variable(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.write().set_variable(name, value);
    }

    pub fn variable(&self, name: &str) -> Option<Value> {
        self.read().variable(name).cloned()
    }

    pub fn set_flag(&self, name: impl Into<String>, value: bool) {
        self.write().set_flag(name, value);
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.read().flag(name)
    }

    /// Apply one effect and return the variable's new value
    pub fn apply_effect(
        &self,
        name: &str,
        op: EffectOp,
        value: impl Into<Value>,
    ) -> Result<Value> {
        Ok(self.write().apply_effect(name, op, value)?)
    }

    /// Apply effects in order, skipping failures; returns how many applied
    pub fn apply_effects(&self, effects: &[Effect]) -> usize {
        let mut variables = self.write();
        effects
            .iter()
            .filter(|effect| {
                match variables.apply_effect(&effect.variable, effect.operation, effect.value.clone())
                {
                    Ok(_) => true,
                    Err(e) => {
                        tracing::warn!(
                            "Effect {} {} {} failed: {}",
                            effect.variable,
                            effect.operation,
                            effect.value,
                            e
                        );
                        false
                    }
                }
            })
            .count()
    }

    /// Fill `{name}`, `{= expr}` and `{cond ? a : b}` placeholders in dialogue text
    pub fn substitute_text(&self, text: &str) -> String {
        self.read().substitute_text(text)
    }

    fn read(&self) -> RwLockReadGuard<'_, VariableSystem> {
        self.variables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VariableSystem> {
        self.variables.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Decoding ==========

    /// Decode condition records from YAML
    pub fn conditions_from_yaml(yaml: &str) -> Result<Vec<Condition>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Decode condition records from JSON
    pub fn conditions_from_json(json: &str) -> Result<Vec<Condition>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode effect records from YAML
    pub fn effects_from_yaml(yaml: &str) -> Result<Vec<Effect>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read condition records from a `.yaml`, `.yml` or `.json` file
    pub fn load_conditions(path: impl AsRef<Path>) -> Result<Vec<Condition>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::conditions_from_yaml(&content),
            Some("json") => Self::conditions_from_json(&content),
            _ => Err(SdkError::InvalidConditionFile(path.display().to_string())),
        }
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}
