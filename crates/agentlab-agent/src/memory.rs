//! Key/value agent memory.
//!
//! A plain map from string key to arbitrary JSON value. No eviction, no
//! size bound, no persistence: entries live as long as the owning agent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AgentError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or silently overwrite.
    pub fn store(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        tracing::trace!(key = %key, "memory store");
        self.entries.insert(key, value.into());
    }

    /// Stored value, or `None` when the key was never stored (or was cleared).
    pub fn retrieve(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Overwrite an existing entry. The key must already be present.
    pub fn update(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(AgentError::KeyNotFound(key.to_string())),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order (for stable display).
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_update_retrieve_scenario() {
        let mut memory = MemoryStore::new();
        memory.store("t1", "pending");
        memory.update("t1", "done").unwrap();
        assert_eq!(memory.retrieve("t1"), Some(&json!("done")));
    }

    #[test]
    fn test_update_missing_key_fails() {
        let mut memory = MemoryStore::new();
        let err = memory.update("ghost", 1).unwrap_err();
        assert!(matches!(err, AgentError::KeyNotFound(ref k) if k == "ghost"));
        assert!(memory.is_empty(), "failed update must not insert");
    }

    #[test]
    fn test_retrieve_absent_is_none() {
        let memory = MemoryStore::new();
        assert_eq!(memory.retrieve("nothing"), None);
    }

    #[test]
    fn test_store_overwrites_silently() {
        let mut memory = MemoryStore::new();
        memory.store("k", json!({"a": 1}));
        memory.store("k", json!([1, 2, 3]));
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.retrieve("k"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_clear_then_update_fails() {
        let mut memory = MemoryStore::new();
        memory.store("a", 1);
        memory.store("b", 2);
        assert_eq!(memory.keys(), vec!["a", "b"]);

        memory.clear();
        assert!(memory.is_empty());
        assert!(!memory.contains_key("a"));
        assert!(memory.update("a", 3).is_err());
    }
}
