//! Condition evaluation example
//!
//! This example demonstrates:
//! - Loading engine configuration from the environment
//! - Decoding condition records as a scene file stores them
//! - Evaluating them with AND/OR logic and printing the trace
//! - Applying node effects and filling dialogue text

use anyhow::Result;
use dvge_sdk::{EngineConfig, Logic, ScriptEngine, ScriptEngineBuilder, VariableContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SHOP_CONDITIONS: &str = r#"
- variable: gold
  operator: ">="
  value: $price
  data_type: number
- variable: name
  operator: starts_with
  value: al
- variable: banned
  value: "yes"
  data_type: boolean
  negated: true
"#;

const PURCHASE_EFFECTS: &str = r#"
- variable: gold
  operation: "-="
  value: "{price}"
- variable: swords
  operation: "+="
  value: 1
"#;

fn main() -> Result<()> {
    let config = EngineConfig::load()?;
    init_tracing(&config.log_level)?;

    println!("=== Condition Example ===\n");

    let engine = ScriptEngineBuilder::new()
        .with_config(config)
        .with_variable("gold", 120)
        .with_variable("price", 75)
        .with_variable("name", "Alice")
        .with_flag("banned", false)
        .build();

    let conditions = ScriptEngine::conditions_from_yaml(SHOP_CONDITIONS)?;
    let context = VariableContext::new();

    for logic in [Logic::And, Logic::Or] {
        let trace = engine.evaluate_conditions_with_trace(&conditions, &logic, &context);
        println!("{} => {}", trace.expression, trace.result);
        println!("{}\n", serde_json::to_string_pretty(&trace)?);
    }

    if engine.evaluate_conditions(&conditions, &Logic::And, &context) {
        let effects = ScriptEngine::effects_from_yaml(PURCHASE_EFFECTS)?;
        let applied = engine.apply_effects(&effects);
        println!("Applied {} of {} effects", applied, effects.len());
    }

    println!(
        "{}",
        engine.substitute_text(
            "{name} now has {gold} gold and {swords} sword(s). {swords ? Ready for the road : Unarmed}."
        )
    );

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
