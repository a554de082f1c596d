//! `${name}` substitution into expression text

use crate::context::VariableResolver;
use dvge_core::Value;
use dvge_parser::interpolation;
use std::borrow::Cow;

/// Source text that reads back as `value` in the expression grammar
///
/// Strings are quoted and escaped, null becomes `null`, and lists and
/// objects are written as JSON. Negative numbers are parenthesized so
/// `${x} ** 2` keeps the author's meaning.
pub fn literal_token(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) if *n < 0 => format!("({})", n),
        Value::Integer(n) => n.to_string(),
        Value::Float(x) if !x.is_finite() => {
            tracing::debug!("Non-finite float {} interpolated as null", x);
            "null".to_string()
        }
        Value::Float(x) if *x < 0.0 => format!("({:?})", x),
        Value::Float(x) => format!("{:?}", x),
        Value::String(s) => quote(s),
        Value::Array(_) | Value::Object(_) => value.to_json().to_string(),
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Replace every `${name}` marker with the literal token of its value
pub fn interpolate<'t>(text: &'t str, resolver: &VariableResolver<'_>) -> Cow<'t, str> {
    interpolation::substitute(text, |name| literal_token(&resolver.resolve(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::VariableContext;
    use dvge_parser::ExpressionParser;
    use dvge_core::ast::Expression;

    #[test]
    fn test_literal_tokens() {
        assert_eq!(literal_token(&Value::Null), "null");
        assert_eq!(literal_token(&Value::Integer(15)), "15");
        assert_eq!(literal_token(&Value::Integer(-3)), "(-3)");
        assert_eq!(literal_token(&Value::Float(2.0)), "2.0");
        assert_eq!(literal_token(&Value::Float(1e20)), "1e20");
        assert_eq!(literal_token(&Value::Bool(true)), "true");
        assert_eq!(literal_token(&"Al".into()), "\"Al\"");
        assert_eq!(
            literal_token(&Value::Array(vec![1.into(), "a".into()])),
            r#"[1,"a"]"#
        );
    }

    #[test]
    fn test_quoted_strings_read_back() {
        for text in [r#"say "hi""#, r"back\slash", "two\nlines", "it's"] {
            let token = literal_token(&text.into());
            assert_eq!(
                ExpressionParser::parse(&token).unwrap(),
                Expression::literal(text),
                "{}",
                token
            );
        }
    }

    #[test]
    fn test_interpolate_uses_resolver() {
        let context: VariableContext =
            [("score".to_string(), Value::Integer(15))].into_iter().collect();
        let resolver = VariableResolver::new(&context, None);
        assert_eq!(interpolate("${score} > 10", &resolver), "15 > 10");
        assert_eq!(interpolate("${missing} == \"\"", &resolver), "\"\" == \"\"");
    }
}
