//! Variable lookup
//!
//! Names resolve against the per-call context first, then the external
//! store. Misses resolve to an empty string and are never errors.

use super::store::VariableStore;
use dvge_core::Value;
use std::collections::HashMap;

/// Per-call variable context
pub type VariableContext = HashMap<String, Value>;

/// Resolves variable names for one evaluation call
pub struct VariableResolver<'a> {
    context: &'a VariableContext,
    store: Option<&'a dyn VariableStore>,
}

impl<'a> VariableResolver<'a> {
    pub fn new(context: &'a VariableContext, store: Option<&'a dyn VariableStore>) -> Self {
        Self { context, store }
    }

    /// Resolve a name: context, then store, then `""`
    pub fn resolve(&self, name: &str) -> Value {
        if let Some(value) = self.context.get(name) {
            return value.clone();
        }

        if let Some(value) = self.store.and_then(|store| store.get_variable(name)) {
            return value;
        }

        tracing::debug!("Variable not found: {}, using empty string", name);
        Value::String(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wins_over_store() {
        let context = HashMap::from([("hp".to_string(), Value::Integer(75))]);
        let store = HashMap::from([
            ("hp".to_string(), Value::Integer(10)),
            ("gold".to_string(), Value::Integer(5)),
        ]);
        let resolver = VariableResolver::new(&context, Some(&store));

        assert_eq!(resolver.resolve("hp"), Value::Integer(75));
        assert_eq!(resolver.resolve("gold"), Value::Integer(5));
    }

    #[test]
    fn test_missing_resolves_to_empty_string() {
        let context = VariableContext::new();
        let resolver = VariableResolver::new(&context, None);
        assert_eq!(resolver.resolve("nobody"), Value::String(String::new()));
    }
}
