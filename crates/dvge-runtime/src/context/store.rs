//! Variable store collaborator
//!
//! The editor owns the authoritative variable and flag state. Evaluators only
//! read from it, through this trait.

use dvge_core::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Read access to an external variable store
///
/// Implementors either override [`VariableStore::get_variable`] or expose
/// their maps through [`VariableStore::variables`] and
/// [`VariableStore::flags`]. The default lookup consults variables first,
/// then flags.
pub trait VariableStore: Send + Sync {
    /// Look up a variable by name
    fn get_variable(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables().and_then(|vars| vars.get(name)) {
            return Some(value.clone());
        }
        self.flags()
            .and_then(|flags| flags.get(name))
            .map(|flag| Value::Bool(*flag))
    }

    /// Variable map, if the store keeps one
    fn variables(&self) -> Option<&HashMap<String, Value>> {
        None
    }

    /// Flag map, if the store keeps one
    fn flags(&self) -> Option<&HashMap<String, bool>> {
        None
    }
}

impl VariableStore for HashMap<String, Value> {
    fn variables(&self) -> Option<&HashMap<String, Value>> {
        Some(self)
    }
}

impl<S: VariableStore + ?Sized> VariableStore for Arc<S> {
    fn get_variable(&self, name: &str) -> Option<Value> {
        (**self).get_variable(name)
    }
}

/// Reads go through the lock; a poisoned lock reads as a miss
impl<S: VariableStore> VariableStore for RwLock<S> {
    fn get_variable(&self, name: &str) -> Option<Value> {
        match self.read() {
            Ok(store) => store.get_variable(name),
            Err(_) => {
                tracing::warn!("Variable store lock poisoned, treating '{}' as missing", name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlagsOnly {
        flags: HashMap<String, bool>,
    }

    impl VariableStore for FlagsOnly {
        fn flags(&self) -> Option<&HashMap<String, bool>> {
            Some(&self.flags)
        }
    }

    struct Both {
        variables: HashMap<String, Value>,
        flags: HashMap<String, bool>,
    }

    impl VariableStore for Both {
        fn variables(&self) -> Option<&HashMap<String, Value>> {
            Some(&self.variables)
        }

        fn flags(&self) -> Option<&HashMap<String, bool>> {
            Some(&self.flags)
        }
    }

    struct Accessor;

    impl VariableStore for Accessor {
        fn get_variable(&self, name: &str) -> Option<Value> {
            Some(Value::String(format!("accessor:{}", name)))
        }

        fn variables(&self) -> Option<&HashMap<String, Value>> {
            unreachable!("accessor takes priority")
        }
    }

    #[test]
    fn test_hashmap_store() {
        let mut vars = HashMap::new();
        vars.insert("gold".to_string(), Value::Integer(50));
        assert_eq!(vars.get_variable("gold"), Some(Value::Integer(50)));
        assert_eq!(vars.get_variable("silver"), None);
    }

    #[test]
    fn test_flags_store() {
        let store = FlagsOnly {
            flags: HashMap::from([("met_king".to_string(), true)]),
        };
        assert_eq!(store.get_variable("met_king"), Some(Value::Bool(true)));
        assert_eq!(store.get_variable("other"), None);
    }

    #[test]
    fn test_variables_take_priority_over_flags() {
        let store = Both {
            variables: HashMap::from([("door".to_string(), Value::from("open"))]),
            flags: HashMap::from([("door".to_string(), false), ("key".to_string(), true)]),
        };
        assert_eq!(store.get_variable("door"), Some(Value::from("open")));
        assert_eq!(store.get_variable("key"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_accessor_takes_priority() {
        assert_eq!(
            Accessor.get_variable("x"),
            Some(Value::String("accessor:x".to_string()))
        );
    }

    #[test]
    fn test_shared_store() {
        let vars = HashMap::from([("hp".to_string(), Value::Integer(3))]);
        let shared: Arc<dyn VariableStore> = Arc::new(RwLock::new(vars));
        assert_eq!(shared.get_variable("hp"), Some(Value::Integer(3)));
    }
}
