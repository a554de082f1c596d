//! Expression evaluation example
//!
//! This example demonstrates:
//! - Evaluating author expressions with `${name}` interpolation
//! - Validating expressions before saving them
//! - Listing the built-in function catalog

use anyhow::Result;
use dvge_sdk::{EngineConfig, ScriptEngineBuilder, Value, VariableContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config = EngineConfig::load()?;
    init_tracing(&config.log_level)?;

    println!("=== Expression Example ===\n");

    let engine = ScriptEngineBuilder::new()
        .with_config(config)
        .with_variable("score", 15)
        .with_variable("inventory", Value::Array(vec!["key".into(), "lantern".into()]))
        .with_variable("birthday", "1990-04-12")
        .build();

    let mut context = VariableContext::new();
    context.insert("bonus".to_string(), Value::Float(2.5));

    let expressions = [
        "${score} > 10",
        "${score} * ${bonus}",
        "round(${score} / 4, 1)",
        "has(${inventory}, \"lantern\") and count(${inventory}) == 2",
        "max(${score}, 20, abs(-30))",
        "age(${birthday}) >= 18",
        "undefined_func(1,2",
    ];

    println!("Evaluation:");
    for text in expressions {
        match engine.try_evaluate_expression(text, &context) {
            Ok(value) => println!("  {:<60} => {}", text, value),
            Err(e) => println!("  {:<60} => error: {}", text, e),
        }
    }

    println!("\nValidation:");
    for text in ["${score} > 10", "undefined_func(1,2", "__import__('os')", "abs(1, 2)"] {
        let report = engine.validate_expression(text);
        println!("  {:<24} valid={}", text, report.valid);
        for error in &report.errors {
            println!("    error: {}", error);
        }
        for warning in &report.warnings {
            println!("    warning: {}", warning);
        }
    }

    println!("\nFunctions:");
    for (signature, description) in engine.list_functions() {
        println!("  {:<32} {}", signature, description);
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(level: &str) -> Result<()> {
    let default_filter = format!("dvge_sdk={0},dvge_runtime={0}", level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
