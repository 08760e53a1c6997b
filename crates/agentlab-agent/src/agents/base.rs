use serde_json::Value;

use super::Agent;
use crate::error::{AgentError, Result};
use crate::memory::MemoryStore;

/// Minimal agent: a name and a memory. It can remember things but has no
/// behaviour, so `act` and `learn` report `NotImplemented`.
#[derive(Debug, Clone)]
pub struct BaseAgent {
    name: String,
    memory: MemoryStore,
}

impl BaseAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            memory: MemoryStore::new(),
        }
    }

    pub fn store_memory(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.memory.store(key, value);
    }

    /// Overwrite an existing entry. Fails with `KeyNotFound` for unknown keys.
    pub fn update_memory(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.memory.update(key, value)
    }

    pub fn retrieve_memory(&self, key: &str) -> Option<&Value> {
        self.memory.retrieve(key)
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }
}

impl Agent for BaseAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn act(&mut self) -> Result<()> {
        Err(AgentError::NotImplemented {
            agent: self.name.clone(),
            capability: "act",
        })
    }

    fn learn(&mut self, _experience: Value) -> Result<()> {
        Err(AgentError::NotImplemented {
            agent: self.name.clone(),
            capability: "learn",
        })
    }
}
