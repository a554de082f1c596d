//! Unit tests for dvge-runtime
//!
//! Covers the condition evaluator, condition lists, expression evaluation,
//! validation and the variable system through the public API.

use dvge_core::{Condition, ConditionOperator, DataType, Logic, Value};
use dvge_runtime::{
    coerce, list_functions, ConditionEvaluator, EffectOp, ExpressionEvaluator,
    ExpressionValidator, VariableContext, VariableStore, VariableSystem,
};
use std::collections::HashMap;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ctx(pairs: &[(&str, Value)]) -> VariableContext {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// ========== Scenarios ==========

#[test]
fn test_scenario_numeric_condition_from_strings() {
    let condition = Condition::new("hp", "50")
        .with_operator(ConditionOperator::Ge)
        .with_data_type(DataType::Number);
    let context = ctx(&[("hp", "75".into())]);
    assert!(ConditionEvaluator::new().evaluate_condition(&condition, &context));
}

#[test]
fn test_scenario_starts_with() {
    let condition = Condition::new("name", "Al")
        .with_operator(ConditionOperator::StartsWith)
        .with_data_type(DataType::String);
    let context = ctx(&[("name", "Alice".into())]);
    assert!(ConditionEvaluator::new().evaluate_condition(&condition, &context));
}

#[test]
fn test_scenario_condition_list_logic() {
    let evaluator = ConditionEvaluator::new();
    let context = ctx(&[("A", false.into()), ("B", true.into())]);
    let conditions = vec![
        Condition::new("A", true).with_data_type(DataType::Boolean),
        Condition::new("B", true).with_data_type(DataType::Boolean),
    ];

    assert!(evaluator.evaluate_conditions(&conditions, &Logic::parse("OR"), &context));
    assert!(!evaluator.evaluate_conditions(&conditions, &Logic::parse("AND"), &context));
    assert!(evaluator.evaluate_conditions(&conditions, &Logic::parse("or"), &context));
}

#[test]
fn test_scenario_interpolated_expression() {
    let evaluator = ExpressionEvaluator::new();
    assert_eq!(
        evaluator.evaluate("${score} > 10", &ctx(&[("score", 15.into())])),
        Value::Bool(true)
    );
    assert_eq!(
        evaluator.evaluate("${score} > 10", &ctx(&[("score", 5.into())])),
        Value::Bool(false)
    );
}

#[test]
fn test_scenario_unbalanced_expression() {
    let text = "undefined_func(1,2";
    assert_eq!(
        ExpressionEvaluator::new().evaluate(text, &VariableContext::new()),
        Value::Bool(false)
    );

    let report = ExpressionValidator::new().validate(text);
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e == "Unbalanced parentheses"));
}

#[test]
fn test_scenario_string_typed_flag_renders_lowercase() {
    let mut vars = VariableSystem::new();
    vars.set_flag("met_king", true);
    vars.set_variable("title", Value::Null);
    let evaluator = ConditionEvaluator::with_store(Arc::new(vars));
    let empty = VariableContext::new();

    let lowercase = Condition::new("met_king", "true").with_data_type(DataType::String);
    let capitalized = Condition::new("met_king", "True").with_data_type(DataType::String);
    assert!(evaluator.evaluate_condition(&lowercase, &empty));
    assert!(!evaluator.evaluate_condition(&capitalized, &empty));

    let null = Condition::new("title", "null").with_data_type(DataType::String);
    let none = Condition::new("title", "None").with_data_type(DataType::String);
    assert!(evaluator.evaluate_condition(&null, &empty));
    assert!(!evaluator.evaluate_condition(&none, &empty));
}

// ========== Properties ==========

#[test]
fn test_negation_inverts_every_operator() {
    let evaluator = ConditionEvaluator::new();
    let context = ctx(&[
        ("hp", 40.into()),
        ("name", "Alice".into()),
        ("bag", Value::Array(vec!["key".into()])),
    ]);

    let cases = vec![
        Condition::new("hp", "50").with_operator(ConditionOperator::Lt).with_data_type(DataType::Number),
        Condition::new("hp", "40").with_operator(ConditionOperator::Eq).with_data_type(DataType::Number),
        Condition::new("name", "LIC").with_operator(ConditionOperator::Contains),
        Condition::new("name", "^A").with_operator(ConditionOperator::Matches),
        Condition::new("bag", "key").with_operator(ConditionOperator::Has).with_data_type(DataType::List),
        Condition::new("name", "").with_operator(ConditionOperator::NotEmpty),
        Condition::new("name", "x").with_operator(ConditionOperator::parse("approximately")),
    ];

    for condition in cases {
        let plain = evaluator.evaluate_condition(&condition, &context);
        let negated = evaluator.evaluate_condition(&condition.clone().negated(true), &context);
        assert_eq!(plain, !negated, "{:?}", condition);
    }
}

#[test]
fn test_empty_list_is_true_for_any_logic() {
    let evaluator = ConditionEvaluator::new();
    for logic in ["AND", "OR", "and", "xor", ""] {
        assert!(evaluator.evaluate_conditions(&[], &Logic::parse(logic), &VariableContext::new()));
    }
}

#[test]
fn test_and_or_match_all_any() {
    let evaluator = ConditionEvaluator::new();
    let context = ctx(&[("t", true.into()), ("f", false.into())]);
    let t = Condition::new("t", true).with_data_type(DataType::Boolean);
    let f = Condition::new("f", true).with_data_type(DataType::Boolean);

    let lists = vec![
        vec![t.clone()],
        vec![f.clone()],
        vec![t.clone(), t.clone()],
        vec![t.clone(), f.clone()],
        vec![f.clone(), f.clone(), t.clone()],
    ];
    for list in lists {
        let results: Vec<bool> = list
            .iter()
            .map(|c| evaluator.evaluate_condition(c, &context))
            .collect();
        assert_eq!(
            evaluator.evaluate_conditions(&list, &Logic::And, &context),
            results.iter().all(|r| *r)
        );
        assert_eq!(
            evaluator.evaluate_conditions(&list, &Logic::Or, &context),
            results.iter().any(|r| *r)
        );
    }
}

#[test]
fn test_coercion_idempotent() {
    let typed = vec![
        (Value::Integer(3), DataType::Number),
        (Value::Float(2.5), DataType::Number),
        (Value::Bool(false), DataType::Boolean),
        (Value::String("x".into()), DataType::String),
        (Value::Array(vec![Value::Null]), DataType::List),
        (Value::Object(HashMap::new()), DataType::Object),
    ];
    for (value, data_type) in typed {
        let once = coerce(value.clone(), &data_type);
        assert_eq!(once, value);
        assert_eq!(coerce(once, &data_type), value);
    }
}

#[test]
fn test_expression_evaluator_never_fails_outward() {
    init_tracing();
    let evaluator = ExpressionEvaluator::new();
    let context = ctx(&[("x", Value::Null)]);
    let inputs = [
        "",
        ")",
        "((((",
        "${x} + 1",
        "\"unterminated",
        "1 = 1",
        "__import__('os').system('ls')",
        "open('f')",
        "[1, 2][0]",
        "a.b",
        "pow(10, 10000)",
        "'ab' * 9999999999",
        &"(".repeat(500),
        &"1+".repeat(3000),
    ];
    for input in inputs {
        let _ = evaluator.evaluate(input, &context);
    }
}

#[test]
fn test_long_operator_chain_is_rejected_not_overflowed() {
    init_tracing();
    let evaluator = ExpressionEvaluator::new();
    let context = VariableContext::new();
    let sum = format!("1{}", "+1".repeat(2040));
    assert_eq!(evaluator.evaluate(&sum, &context), Value::Bool(false));
    for op in ["*", " and ", " or "] {
        let long = format!("1{}", format!("{}1", op).repeat(600));
        assert_eq!(evaluator.evaluate(&long, &context), Value::Bool(false), "{}", op);
    }
    assert_eq!(
        evaluator.evaluate(&format!("1{}", "+1".repeat(20)), &context),
        Value::Integer(21)
    );
}

#[test]
fn test_validator_denylist() {
    let validator = ExpressionValidator::new();
    for text in ["__class__", "import os", "eval(x)", "open('f')"] {
        let report = validator.validate(text);
        assert!(!report.valid, "{}", text);
        assert!(!report.errors.is_empty(), "{}", text);
    }
}

// ========== Store and variable system ==========

#[test]
fn test_shared_variables_seen_by_evaluators() {
    let shared = VariableSystem::new().into_shared();
    shared.write().unwrap().set_variable("gold", 10);
    shared.write().unwrap().set_flag("met_king", true);

    let store: Arc<dyn VariableStore> = shared.clone();
    let conditions = ConditionEvaluator::with_store(store.clone());
    let expressions = ExpressionEvaluator::with_store(store);

    let rich = Condition::new("gold", "25")
        .with_operator(ConditionOperator::Ge)
        .with_data_type(DataType::Number);
    assert!(!conditions.evaluate_condition(&rich, &VariableContext::new()));

    shared
        .write()
        .unwrap()
        .apply_effect("gold", EffectOp::Add, 20)
        .unwrap();
    assert!(conditions.evaluate_condition(&rich, &VariableContext::new()));
    assert_eq!(
        expressions.evaluate("${met_king} and ${gold} == 30", &VariableContext::new()),
        Value::Bool(true)
    );
}

#[test]
fn test_context_overrides_store() {
    let mut vars = VariableSystem::new();
    vars.set_variable("hp", 10);
    let evaluator = ExpressionEvaluator::with_store(Arc::new(vars));
    assert_eq!(
        evaluator.evaluate("${hp}", &ctx(&[("hp", 99.into())])),
        Value::Integer(99)
    );
}

#[test]
fn test_dialogue_text_substitution() {
    let mut vars = VariableSystem::new();
    vars.set_variable("gold", 120);
    vars.set_flag("has_sword", false);

    let text = vars.substitute_text(
        "Gold: {gold}. Tax: {= {gold} * 0.5}. {has_sword ? Armed : Unarmed}. Sword: {has_sword}",
    );
    assert_eq!(text, "Gold: 120. Tax: 60. Unarmed. Sword: false");
}

#[test]
fn test_list_functions_covers_catalog() {
    let functions = list_functions();
    for name in [
        "contains", "starts_with", "ends_with", "matches", "length", "empty", "in", "not_in",
        "has", "count", "any", "all", "abs", "round", "floor", "ceil", "min", "max", "sum", "avg",
        "sqrt", "pow", "random", "now", "today", "age", "days_since", "format_date",
    ] {
        assert!(
            functions.keys().any(|sig| sig.starts_with(&format!("{}(", name))),
            "missing {}",
            name
        );
    }
}
