//! Collaborator interfaces - intent registry and session state
//!
//! The engine never owns these concerns; the host runtime supplies them. The
//! in-memory implementations are enough to wire the engine in tests or in
//! hosts without external infrastructure.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named out-context and the parameter names it may carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDefinition {
    pub name: String,
    pub parameters: Vec<String>,
}

impl ContextDefinition {
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|parameter| parameter == name)
    }
}

/// Formal definition of an intent as known to the host runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub name: String,
    pub out_contexts: Vec<ContextDefinition>,
}

impl IntentDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            out_contexts: Vec::new(),
        }
    }

    /// Attach an out-context definition, builder style
    pub fn with_context(mut self, name: impl Into<String>, parameters: &[&str]) -> Self {
        self.out_contexts.push(ContextDefinition {
            name: name.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    pub fn out_context(&self, name: &str) -> Option<&ContextDefinition> {
        self.out_contexts.iter().find(|context| context.name == name)
    }
}

/// Resolves intent names to their formal definitions
pub trait IntentRegistry {
    fn lookup_intent(&self, name: &str) -> Option<&IntentDefinition>;
}

/// Per-session key/value state
///
/// This engine only writes (the `intent-style` side effect); `get` is part of
/// the collaborator contract because request building reads prior activity
/// labels and aliases from the same store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn store(&mut self, key: &str, value: Value);
}

/// Registry backed by a hash map
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    intents: AHashMap<String, IntentDefinition>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: IntentDefinition) {
        self.intents.insert(definition.name.clone(), definition);
    }
}

impl IntentRegistry for InMemoryRegistry {
    fn lookup_intent(&self, name: &str) -> Option<&IntentDefinition> {
        self.intents.get(name)
    }
}

/// Session store backed by a hash map
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    values: AHashMap<String, Value>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}
