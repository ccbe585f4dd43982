//! In-memory adapters for ephemeral hosts and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use grc_domain::CategoryTree;

use crate::infrastructure::ports::{
    BaselineError, BaselineSource, LegacyCache, SettingsStore, StoreError,
};

/// Settings store backed by a map. Nothing survives the process.
#[derive(Default)]
pub struct InMemorySettingsStore {
    slots: RwLock<HashMap<String, Value>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot (builder style).
    pub fn with_slot(self, key: &str, value: Value) -> Self {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(key.to_string(), value);
        }
        self
    }

    /// Current value of a slot, bypassing the async port.
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.slots.read().ok().and_then(|slots| slots.get(key).cloned())
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let slots = self
            .slots
            .read()
            .map_err(|e| StoreError::unavailable(format!("settings lock poisoned: {e}")))?;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|e| StoreError::unavailable(format!("settings lock poisoned: {e}")))?;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}

/// Legacy cache backed by a map.
#[derive(Default)]
pub struct InMemoryLegacyCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryLegacyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.into());
        }
        self
    }
}

impl LegacyCache for InMemoryLegacyCache {
    fn load(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for legacy cache: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match self.entries.write() {
            Ok(mut guard) => {
                guard.remove(key);
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for legacy cache: {}", e);
            }
        }
    }
}

/// Baseline that is already in memory (embedded documents, tests).
pub struct StaticBaselineSource {
    tree: CategoryTree,
}

impl StaticBaselineSource {
    pub fn new(tree: CategoryTree) -> Self {
        Self { tree }
    }
}

#[async_trait]
impl BaselineSource for StaticBaselineSource {
    async fn fetch(&self) -> Result<CategoryTree, BaselineError> {
        Ok(self.tree.clone())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
