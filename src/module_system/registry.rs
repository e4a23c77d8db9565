//! Write-once module registry

use serde_json::Value;
use std::collections::HashMap;

use crate::error::{GaspmError, Result};

/// Registry mapping module keys to exported values.
///
/// Keys come in two forms: arbitrary registered names (a package's declared
/// name) and `/`-prefixed path-like keys. A key may be written at most once
/// for the registry's lifetime; the registry is never cleared.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Value>,
}

impl ModuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Register a module's exports under `key`.
    ///
    /// Fails with [`GaspmError::DuplicateModule`] if the key is already
    /// taken; the first registration is left untouched.
    pub fn register(&mut self, key: &str, value: Value) -> Result<()> {
        if self.modules.contains_key(key) {
            return Err(GaspmError::DuplicateModule(key.to_string()));
        }
        self.modules.insert(key.to_string(), value);
        Ok(())
    }

    /// Look up a module's exports by key.
    pub fn lookup(&self, key: &str) -> Result<&Value> {
        self.modules
            .get(key)
            .ok_or_else(|| GaspmError::ModuleNotFound(key.to_string()))
    }

    /// Check whether a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    /// Get all registered keys.
    pub fn keys(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Get the number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
