//! Expression validation
//!
//! Validation reports problems without executing anything. Errors make an
//! expression invalid; warnings flag things that may fail at runtime.
//!
//! The unsafe-pattern check is advisory. The expression grammar has no
//! attribute access, imports or I/O, so it is what actually confines
//! expressions; the patterns only give authors early feedback.

use crate::context::{VariableContext, VariableResolver};
use crate::error::RuntimeError;
use crate::expression::interpolate;
use crate::functions::BuiltinFunction;
use crate::options::EvaluatorOptions;
use dvge_parser::interpolation;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Patterns reported as potentially unsafe
pub const UNSAFE_PATTERNS: [&str; 5] = [
    r"__\w+__",
    r"import\s+",
    r"exec\s*\(",
    r"eval\s*\(",
    r"open\s*\(",
];

static UNSAFE_REGEXES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    UNSAFE_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok().map(|regex| (*pattern, regex)))
        .collect()
});

/// Result of validating an expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validates expression text
#[derive(Debug, Clone, Default)]
pub struct ExpressionValidator {
    options: EvaluatorOptions,
}

impl ExpressionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvaluatorOptions) -> Self {
        Self { options }
    }

    /// Synthetic context substituted before the syntax check
    pub fn test_context() -> VariableContext {
        VariableContext::from([
            ("test_var".to_string(), "test_value".into()),
            ("test_num".to_string(), 42.into()),
        ])
    }

    pub fn validate(&self, text: &str) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if text.matches('(').count() != text.matches(')').count() {
            errors.push("Unbalanced parentheses".to_string());
        }

        for name in interpolation::references(text) {
            if !interpolation::is_identifier(name) {
                warnings.push(format!("Variable name '{}' may not be valid", name));
            }
        }

        for (pattern, regex) in UNSAFE_REGEXES.iter() {
            if regex.is_match(text) {
                errors.push(format!("Potentially unsafe operation detected: {}", pattern));
            }
        }

        let context = Self::test_context();
        let resolver = VariableResolver::new(&context, None);
        let source = interpolate(text, &resolver);

        if source.len() > self.options.max_expression_length {
            warnings.push(format!(
                "Potential runtime error: {}",
                RuntimeError::from(dvge_parser::ParseError::TooLong {
                    length: source.len(),
                    max_length: self.options.max_expression_length,
                })
            ));
        }

        match self.options.parser().parse_str(&source) {
            Ok(expr) => {
                expr.visit_calls(&mut |name, argc| match BuiltinFunction::from_name(name) {
                    None => warnings.push(format!(
                        "Potential runtime error: {}",
                        RuntimeError::UnknownFunction(name.to_string())
                    )),
                    Some(function) if !function.arity().accepts(argc) => {
                        warnings.push(format!(
                            "Potential runtime error: {}",
                            RuntimeError::ArityMismatch {
                                function: name.to_string(),
                                expected: function.arity().to_string(),
                                actual: argc,
                            }
                        ))
                    }
                    Some(_) => {}
                });
            }
            Err(e) => errors.push(format!("Syntax error: {}", e)),
        }

        tracing::debug!(
            "Validated '{}': {} error(s), {} warning(s)",
            text,
            errors.len(),
            warnings.len()
        );
        ValidationReport::from_findings(errors, warnings)
    }
}
