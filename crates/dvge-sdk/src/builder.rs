//! Builder pattern for ScriptEngine

use crate::config::EngineConfig;
use crate::engine::ScriptEngine;
use crate::error::Result;
use dvge_core::Value;
use dvge_runtime::{
    Clock, ConditionEvaluator, EvaluatorOptions, ExpressionEvaluator, ExpressionValidator,
    SharedVariables, SystemClock, VariableStore, VariableSystem,
};
use std::sync::Arc;

/// Builder for ScriptEngine
///
/// # Example
///
/// ```rust,ignore
/// use dvge_sdk::ScriptEngineBuilder;
///
/// let engine = ScriptEngineBuilder::from_env()?
///     .with_variable("gold", 50)
///     .with_flag("met_king", true)
///     .build();
/// ```
pub struct ScriptEngineBuilder {
    config: EngineConfig,
    clock: Option<Arc<dyn Clock>>,
    variables: Option<SharedVariables>,
    initial_variables: Vec<(String, Value)>,
    initial_flags: Vec<(String, bool)>,
}

impl ScriptEngineBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            clock: None,
            variables: None,
            initial_variables: Vec::new(),
            initial_flags: Vec::new(),
        }
    }

    /// Create a builder from `.env`, the config file and `DVGE_*` variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new().with_config(EngineConfig::load()?))
    }

    /// Set the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set evaluator options only
    pub fn with_options(mut self, options: EvaluatorOptions) -> Self {
        self.config.evaluator = options;
        self
    }

    /// Clock used by the date functions
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use an existing shared variable system instead of a fresh one.
    /// Its text placeholders pick up this builder's options and clock on `build`.
    pub fn with_variables(mut self, variables: SharedVariables) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Seed a variable
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_variables.push((name.into(), value.into()));
        self
    }

    /// Seed a flag
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.initial_flags.push((name.into(), value));
        self
    }

    /// Build the engine
    pub fn build(self) -> ScriptEngine {
        let options = self.config.evaluator.clone();
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        // The variable system's own evaluator works from a snapshot context,
        // never through the shared lock it is held under. A supplied system
        // is switched over to the builder's options and clock as well.
        let variables = self
            .variables
            .unwrap_or_else(|| VariableSystem::new().into_shared());

        {
            let mut system = variables
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            system.set_evaluator(
                ExpressionEvaluator::new()
                    .with_options(options.clone())
                    .with_clock(clock.clone()),
            );
            for (name, value) in self.initial_variables {
                system.set_variable(name, value);
            }
            for (name, value) in self.initial_flags {
                system.set_flag(name, value);
            }
        }

        let store: Arc<dyn VariableStore> = variables.clone();
        let conditions = ConditionEvaluator::with_store(store.clone()).with_options(options.clone());
        let expressions = ExpressionEvaluator::with_store(store)
            .with_options(options.clone())
            .with_clock(clock);
        let validator = ExpressionValidator::with_options(options);

        tracing::debug!("Built script engine with {:?}", self.config.evaluator);
        ScriptEngine::from_parts(self.config, variables, conditions, expressions, validator)
    }
}

impl Default for ScriptEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
