//! Unit tests for dvge-core
//!
//! Condition records as they appear in stored scene files, plus the value
//! model they carry.

use anyhow::Result;
use dvge_core::ast::{Expression, Operator};
use dvge_core::{Condition, ConditionOperator, DataType, Logic, Value};

// ========== Condition Record Tests ==========

#[test]
fn test_condition_from_yaml_full_record() -> Result<()> {
    let yaml = r#"
variable: hp
operator: ">="
value: "50"
data_type: number
negated: true
"#;
    let condition: Condition = serde_yaml::from_str(yaml)?;
    assert_eq!(condition.variable, "hp");
    assert_eq!(condition.operator, ConditionOperator::Ge);
    assert_eq!(condition.value, Value::String("50".into()));
    assert_eq!(condition.data_type, DataType::Number);
    assert!(condition.negated);
    Ok(())
}

#[test]
fn test_condition_defaults_for_missing_fields() -> Result<()> {
    let condition: Condition = serde_json::from_str(r#"{"variable": "met_king"}"#)?;
    assert_eq!(condition.operator, ConditionOperator::Eq);
    assert_eq!(condition.data_type, DataType::String);
    assert_eq!(condition.value, Value::String(String::new()));
    assert!(!condition.negated);
    assert_eq!(condition, Condition::new("met_king", ""));
    Ok(())
}

#[test]
fn test_condition_list_from_yaml() -> Result<()> {
    let yaml = r#"
- variable: name
  operator: starts_with
  value: Al
- variable: gold
  operator: "<"
  value: $cost
  data_type: number
- variable: mood
  operator: resembles
  data_type: emotion
"#;
    let conditions: Vec<Condition> = serde_yaml::from_str(yaml)?;
    assert_eq!(conditions.len(), 3);
    assert_eq!(conditions[0].operator, ConditionOperator::StartsWith);
    assert_eq!(conditions[1].value_reference(), Some("cost"));
    assert_eq!(
        conditions[2].operator,
        ConditionOperator::Unrecognized("resembles".into())
    );
    assert_eq!(
        conditions[2].data_type,
        DataType::Unrecognized("emotion".into())
    );
    Ok(())
}

#[test]
fn test_condition_serializes_operator_names() -> Result<()> {
    let condition = Condition::new("bag", "key")
        .with_operator(ConditionOperator::NotIn)
        .with_data_type(DataType::List);
    let json = serde_json::to_value(&condition)?;
    assert_eq!(json["operator"], "not_in");
    assert_eq!(json["data_type"], "list");
    assert_eq!(json["negated"], false);
    Ok(())
}

#[test]
fn test_unrecognized_names_survive_serialization() -> Result<()> {
    let condition: Condition =
        serde_json::from_str(r#"{"variable": "x", "operator": "~=", "data_type": "date"}"#)?;
    let json = serde_json::to_value(&condition)?;
    assert_eq!(json["operator"], "~=");
    assert_eq!(json["data_type"], "date");
    Ok(())
}

#[test]
fn test_literal_value_is_not_a_reference() {
    assert_eq!(Condition::new("a", "cost").value_reference(), None);
    assert_eq!(Condition::new("a", 5).value_reference(), None);
    assert_eq!(Condition::new("a", "$cost").value_reference(), Some("cost"));
}

// ========== Logic Tests ==========

#[test]
fn test_logic_from_stored_text() -> Result<()> {
    let modes: Vec<Logic> = serde_json::from_str(r#"["AND", "or", "Or", "XOR"]"#)?;
    assert_eq!(
        modes,
        vec![
            Logic::And,
            Logic::Or,
            Logic::Or,
            Logic::Unrecognized("XOR".into())
        ]
    );
    Ok(())
}

// ========== Value Tests ==========

#[test]
fn test_value_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Integer(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::String(String::new()).is_truthy());
    assert!(!Value::Array(vec![]).is_truthy());
    assert!(Value::String("false".into()).is_truthy());
    assert!(Value::Array(vec![Value::Null]).is_truthy());
}

#[test]
fn test_value_display_forms() {
    assert_eq!(Value::Float(75.0).to_string(), "75.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Integer(75).to_string(), "75");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(
        Value::Array(vec!["a".into(), 1.into()]).to_string(),
        r#"["a",1]"#
    );
}

#[test]
fn test_value_yaml_untagged() -> Result<()> {
    let value: Value = serde_yaml::from_str("[1, 2.5, yes_text, true, ~]")?;
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Integer(1),
            Value::Float(2.5),
            Value::String("yes_text".into()),
            Value::Bool(true),
            Value::Null,
        ])
    );
    Ok(())
}

#[test]
fn test_expect_helpers_report_type() {
    let err = Value::String("x".into()).expect_number().unwrap_err();
    assert!(err.to_string().contains("string"));
    assert_eq!(Value::Float(3.0).expect_integer().ok(), Some(3));
    assert!(Value::Integer(1).expect_array().is_err());
}

// ========== AST Tests ==========

#[test]
fn test_visit_calls_walks_nested_arguments() {
    let expr = Expression::binary(
        Expression::function_call(
            "max",
            vec![
                Expression::function_call("abs", vec![Expression::literal(-1)]),
                Expression::identifier("x"),
            ],
        ),
        Operator::Gt,
        Expression::literal(0),
    );

    let mut calls = Vec::new();
    expr.visit_calls(&mut |name, argc| calls.push((name.to_string(), argc)));
    calls.sort();
    assert_eq!(
        calls,
        vec![("abs".to_string(), 1), ("max".to_string(), 2)]
    );
}
