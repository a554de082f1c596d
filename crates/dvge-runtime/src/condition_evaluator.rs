//! Condition record evaluation
//!
//! A condition resolves its variable (and an optional `$name` comparison
//! reference), coerces both operands to the record's data type, applies the
//! operator and finally the negation flag. Evaluation is total: operator
//! failures are logged and read as `false`.

use crate::coercion::coerce;
use crate::context::{VariableContext, VariableResolver, VariableStore};
use crate::error::RuntimeError;
use crate::operators::execute_condition_op;
use crate::options::EvaluatorOptions;
use crate::trace::ConditionTrace;
use dvge_core::{Condition, Logic, Value};
use std::fmt;
use std::sync::Arc;

/// Evaluates condition records and condition lists
#[derive(Clone, Default)]
pub struct ConditionEvaluator {
    store: Option<Arc<dyn VariableStore>>,
    options: EvaluatorOptions,
}

impl fmt::Debug for ConditionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionEvaluator")
            .field("has_store", &self.store.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Operands after lookup and coercion, plus the operator outcome
struct Outcome {
    left: Value,
    right: Value,
    result: bool,
    error: Option<RuntimeError>,
}

impl ConditionEvaluator {
    /// Evaluator with no external store; only the per-call context is consulted
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator that falls back to `store` for names missing from the context
    pub fn with_store(store: Arc<dyn VariableStore>) -> Self {
        Self {
            store: Some(store),
            options: EvaluatorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvaluatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    pub fn store(&self) -> Option<&Arc<dyn VariableStore>> {
        self.store.as_ref()
    }

    /// Evaluate a single condition
    pub fn evaluate_condition(&self, condition: &Condition, context: &VariableContext) -> bool {
        self.run(condition, context).result
    }

    /// Evaluate a single condition, recording the coerced operands
    pub fn evaluate_with_trace(
        &self,
        condition: &Condition,
        context: &VariableContext,
    ) -> ConditionTrace {
        let outcome = self.run(condition, context);
        let trace = ConditionTrace::binary(
            describe(condition),
            outcome.left,
            condition.operator.as_str(),
            outcome.right,
            outcome.result,
        )
        .with_negated(condition.negated);

        match outcome.error {
            Some(error) => trace.with_error(error.to_string()),
            None => trace,
        }
    }

    /// Evaluate a list of conditions combined with `logic`
    ///
    /// Every condition is evaluated. An empty list is true.
    pub fn evaluate_conditions(
        &self,
        conditions: &[Condition],
        logic: &Logic,
        context: &VariableContext,
    ) -> bool {
        let results: Vec<bool> = conditions
            .iter()
            .map(|condition| self.evaluate_condition(condition, context))
            .collect();
        combine(&results, logic)
    }

    /// Evaluate a list of conditions, returning a group trace
    pub fn evaluate_conditions_with_trace(
        &self,
        conditions: &[Condition],
        logic: &Logic,
        context: &VariableContext,
    ) -> ConditionTrace {
        let traces: Vec<ConditionTrace> = conditions
            .iter()
            .map(|condition| self.evaluate_with_trace(condition, context))
            .collect();
        let results: Vec<bool> = traces.iter().map(|t| t.result).collect();
        let result = combine(&results, logic);
        ConditionTrace::group(logic.as_str(), traces, result)
    }

    fn run(&self, condition: &Condition, context: &VariableContext) -> Outcome {
        let resolver = VariableResolver::new(context, self.store.as_deref());

        let left = resolver.resolve(&condition.variable);
        let right = match condition.value_reference() {
            Some(name) => resolver.resolve(name),
            None => condition.value.clone(),
        };

        let left = coerce(left, &condition.data_type);
        let right = coerce(right, &condition.data_type);

        match execute_condition_op(&left, &condition.operator, &right, &self.options) {
            Ok(value) => {
                let result = value.is_truthy() != condition.negated;
                tracing::debug!(
                    "Condition {} => {} (left={:?}, right={:?})",
                    describe(condition),
                    result,
                    left,
                    right
                );
                Outcome {
                    left,
                    right,
                    result,
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(
                    "Condition {} failed, evaluating as false: {}",
                    describe(condition),
                    error
                );
                Outcome {
                    left,
                    right,
                    result: false,
                    error: Some(error),
                }
            }
        }
    }
}

/// Combine per-condition results; unrecognized logic combines as AND
fn combine(results: &[bool], logic: &Logic) -> bool {
    match logic {
        Logic::And => results.iter().all(|r| *r),
        Logic::Or => results.is_empty() || results.iter().any(|r| *r),
        Logic::Unrecognized(name) => {
            tracing::debug!("Unrecognized logic '{}', combining as AND", name);
            results.iter().all(|r| *r)
        }
    }
}

fn describe(condition: &Condition) -> String {
    let rendered = format!(
        "{} {} {}",
        condition.variable, condition.operator, condition.value
    );
    if condition.negated {
        format!("not ({})", rendered)
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvge_core::{ConditionOperator, DataType};
    use std::collections::HashMap;

    fn ctx(pairs: &[(&str, Value)]) -> VariableContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn number_condition(variable: &str, op: &str, value: &str) -> Condition {
        Condition::new(variable, value)
            .with_operator(ConditionOperator::parse(op))
            .with_data_type(DataType::Number)
    }

    #[test]
    fn test_numeric_comparison_after_coercion() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("hp", "75".into())]);
        assert!(evaluator.evaluate_condition(&number_condition("hp", ">=", "50"), &context));
        assert!(!evaluator.evaluate_condition(&number_condition("hp", "<", "50"), &context));
    }

    #[test]
    fn test_negation_inverts() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("hp", 75.into())]);
        let condition = number_condition("hp", ">=", "50").negated(true);
        assert!(!evaluator.evaluate_condition(&condition, &context));
    }

    #[test]
    fn test_value_reference_resolves_variable() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("gold", 30.into()), ("price", 25.into())]);
        assert!(evaluator.evaluate_condition(&number_condition("gold", ">=", "$price"), &context));
    }

    #[test]
    fn test_store_consulted_after_context() {
        let store: HashMap<String, Value> = ctx(&[("hp", 10.into()), ("mp", 5.into())]);
        let evaluator = ConditionEvaluator::with_store(Arc::new(store));
        let context = ctx(&[("hp", 90.into())]);

        assert!(evaluator.evaluate_condition(&number_condition("hp", ">", "50"), &context));
        assert!(evaluator.evaluate_condition(&number_condition("mp", "==", "5"), &context));
    }

    #[test]
    fn test_missing_variable_is_empty_string() {
        let evaluator = ConditionEvaluator::new();
        let condition = Condition::new("missing", "").with_operator(ConditionOperator::Empty);
        assert!(evaluator.evaluate_condition(&condition, &VariableContext::new()));
    }

    #[test]
    fn test_operator_failure_is_false_even_when_negated() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("name", "abc".into())]);
        let condition = number_condition("name", ">", "1").negated(true);
        assert!(!evaluator.evaluate_condition(&condition, &context));

        let trace = evaluator.evaluate_with_trace(&condition, &context);
        assert!(!trace.result);
        assert!(trace.error.is_some());
    }

    #[test]
    fn test_condition_lists() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("a", false.into()), ("b", true.into())]);
        let conditions = vec![
            Condition::new("a", true).with_data_type(DataType::Boolean),
            Condition::new("b", true).with_data_type(DataType::Boolean),
        ];

        assert!(evaluator.evaluate_conditions(&conditions, &Logic::Or, &context));
        assert!(!evaluator.evaluate_conditions(&conditions, &Logic::And, &context));
        assert!(!evaluator.evaluate_conditions(&conditions, &Logic::parse("XOR"), &context));
        assert!(evaluator.evaluate_conditions(&[], &Logic::Or, &context));
        assert!(evaluator.evaluate_conditions(&[], &Logic::And, &context));
    }

    #[test]
    fn test_list_trace_records_every_condition() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("a", true.into())]);
        let conditions = vec![
            Condition::new("a", true).with_data_type(DataType::Boolean),
            Condition::new("zzz", "x"),
        ];

        let trace = evaluator.evaluate_conditions_with_trace(&conditions, &Logic::Or, &context);
        assert!(trace.result);
        assert_eq!(trace.group_type.as_deref(), Some("OR"));
        assert_eq!(trace.nested.map(|n| n.len()), Some(2));
    }

    #[test]
    fn test_trace_carries_coerced_operands() {
        let evaluator = ConditionEvaluator::new();
        let context = ctx(&[("hp", "75".into())]);
        let trace = evaluator.evaluate_with_trace(&number_condition("hp", ">=", "50"), &context);
        assert_eq!(trace.left_value, Some(Value::Integer(75)));
        assert_eq!(trace.right_value, Some(Value::Integer(50)));
        assert_eq!(trace.operator.as_deref(), Some(">="));
        assert_eq!(trace.expression, "hp >= 50");
    }
}
