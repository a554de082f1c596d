//! String built-ins
//!
//! Operands are compared through their display form, so `contains(123, 2)`
//! works on `"123"`.

use crate::error::{Result, RuntimeError};
use dvge_core::Value;
use regex::Regex;

fn text_pair(text: &Value, other: &Value, case_insensitive: bool) -> (String, String) {
    let (text, other) = (text.to_string(), other.to_string());
    if case_insensitive {
        (text.to_lowercase(), other.to_lowercase())
    } else {
        (text, other)
    }
}

pub fn contains(text: &Value, substring: &Value, case_insensitive: bool) -> bool {
    let (text, substring) = text_pair(text, substring, case_insensitive);
    text.contains(&substring)
}

pub fn starts_with(text: &Value, prefix: &Value, case_insensitive: bool) -> bool {
    let (text, prefix) = text_pair(text, prefix, case_insensitive);
    text.starts_with(&prefix)
}

pub fn ends_with(text: &Value, suffix: &Value, case_insensitive: bool) -> bool {
    let (text, suffix) = text_pair(text, suffix, case_insensitive);
    text.ends_with(&suffix)
}

/// Regex match anchored at the start of the text
pub fn matches(text: &Value, pattern: &Value) -> Result<bool> {
    let anchored = format!("^(?:{})", pattern);
    let regex = Regex::new(&anchored).map_err(|e| RuntimeError::InvalidRegex(e.to_string()))?;
    Ok(regex.is_match(&text.to_string()))
}

/// Length in characters of the display form
pub fn length(text: &Value) -> i64 {
    i64::try_from(text.to_string().chars().count()).unwrap_or(i64::MAX)
}

/// True when the display form is blank after trimming
pub fn empty(text: &Value) -> bool {
    text.to_string().trim().is_empty()
}

pub fn not_empty(text: &Value) -> bool {
    !empty(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_predicates() {
        let name = Value::from("Alice");
        assert!(starts_with(&name, &"al".into(), true));
        assert!(!starts_with(&name, &"al".into(), false));
        assert!(ends_with(&name, &"ICE".into(), true));
        assert!(contains(&name, &"LI".into(), true));
        assert!(contains(&Value::Integer(123), &Value::Integer(2), true));
    }

    #[test]
    fn test_matches_anchored_at_start() {
        assert!(matches(&"hero_01".into(), &r"hero_\d+".into()).unwrap());
        assert!(!matches(&"the hero".into(), &"hero".into()).unwrap());
        assert!(matches(&"hero-x".into(), &"hero|villain".into()).unwrap());
        assert!(!matches(&"x-villain".into(), &"hero|villain".into()).unwrap());
        assert!(matches!(
            matches(&"x".into(), &"(".into()),
            Err(RuntimeError::InvalidRegex(_))
        ));
    }

    #[test]
    fn test_length_and_emptiness() {
        assert_eq!(length(&"héllo".into()), 5);
        assert_eq!(length(&Value::Integer(1024)), 4);
        assert!(empty(&"   ".into()));
        assert!(not_empty(&" x ".into()));
    }
}
