//! Configuration types for ScriptEngine

use crate::error::Result;
use dvge_runtime::EvaluatorOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up by [`EngineConfig::load`], without extension
pub const DEFAULT_CONFIG_FILE: &str = "config/dvge";

/// Prefix of environment variables overriding the config file
pub const ENV_PREFIX: &str = "DVGE";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Evaluator limits and string/date behaviour
    pub evaluator: EvaluatorOptions,

    /// Default tracing level for the demo binaries
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorOptions::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set evaluator options
    pub fn with_evaluator(mut self, evaluator: EvaluatorOptions) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Load configuration from `.env`, `config/dvge.*` and `DVGE_*` variables
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration using the given config file (extension optional)
    ///
    /// Nested keys are separated by `__` in environment variables, as in
    /// `DVGE_EVALUATOR__MAX_EXPRESSION_LENGTH=8192`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = path.as_ref().to_string_lossy();
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build();

        match config_result {
            Ok(cfg) => Ok(cfg.try_deserialize()?),
            Err(e) => {
                tracing::info!("No usable config at '{}' ({}), using defaults", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Decode a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and decode a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
