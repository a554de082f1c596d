//! Evaluator options

use dvge_parser::{ExpressionParser, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

/// Default maximum expression length in bytes
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 4096;

/// Default date format for date built-ins
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tunables shared by the condition evaluator, expression evaluator and validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorOptions {
    /// Longest expression text accepted, after interpolation
    pub max_expression_length: usize,

    /// Deepest nesting accepted by the parser
    pub max_expression_depth: usize,

    /// Compare strings case-insensitively in `contains`, `starts_with` and `ends_with`
    pub case_insensitive_strings: bool,

    /// Format used to read dates and as the default output of `format_date`
    pub date_format: String,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            max_expression_depth: DEFAULT_MAX_DEPTH,
            case_insensitive_strings: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl EvaluatorOptions {
    /// Parser honouring the depth limit
    pub fn parser(&self) -> ExpressionParser {
        ExpressionParser::with_max_depth(self.max_expression_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EvaluatorOptions::default();
        assert_eq!(options.max_expression_length, 4096);
        assert_eq!(options.max_expression_depth, 64);
        assert!(options.case_insensitive_strings);
        assert_eq!(options.date_format, "%Y-%m-%d");
        assert_eq!(options.parser().max_depth(), 64);
    }

    #[test]
    fn test_partial_options_deserialize_with_defaults() {
        let options: EvaluatorOptions =
            serde_json::from_str(r#"{"case_insensitive_strings": false}"#).unwrap();
        assert!(!options.case_insensitive_strings);
        assert_eq!(options.max_expression_length, DEFAULT_MAX_EXPRESSION_LENGTH);
    }
}
