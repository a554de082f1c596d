//! `${name}` interpolation markers
//!
//! Expressions reference variables as `${name}`. The payload is everything up
//! to the first closing brace and is not trimmed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("interpolation pattern must compile"));

/// Names referenced by `${name}` markers, in order of appearance
pub fn references(text: &str) -> Vec<&str> {
    REFERENCE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replace every `${name}` marker with the text returned by `render`
pub fn substitute<'a, F>(text: &'a str, mut render: F) -> Cow<'a, str>
where
    F: FnMut(&str) -> String,
{
    REFERENCE_PATTERN.replace_all(text, |caps: &Captures<'_>| render(&caps[1]))
}

/// Python-style identifier check used for reference names
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
