//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] dvge_parser::ParseError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] dvge_runtime::RuntimeError),

    /// YAML decoding error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid condition file
    #[error("Invalid condition file: {0}")]
    InvalidConditionFile(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_condition_file() {
        let error = SdkError::InvalidConditionFile("scene.yaml".to_string());
        assert!(error.to_string().contains("Invalid condition file"));
        assert!(error.to_string().contains("scene.yaml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_runtime_error_conversion() {
        let runtime_error = dvge_runtime::RuntimeError::UnknownFunction("frobnicate".to_string());
        let sdk_error: SdkError = runtime_error.into();
        assert!(sdk_error.to_string().starts_with("Runtime error:"));
        assert!(sdk_error.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let sdk_error: SdkError = yaml_error.into();
        assert!(sdk_error.to_string().starts_with("YAML error:"));
    }
}
