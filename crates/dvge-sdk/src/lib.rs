//! DVGE Scripting SDK
//!
//! High-level API over the condition evaluator, expression evaluator and
//! variable system used by dialogue scenes.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::ScriptEngineBuilder;
pub use config::EngineConfig;
pub use engine::{Effect, ScriptEngine};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use dvge_core::{Condition, ConditionOperator, DataType, Logic, Value};
pub use dvge_runtime::{
    ConditionTrace, EffectOp, EvaluatorOptions, FixedClock, ValidationReport, VariableContext,
};
