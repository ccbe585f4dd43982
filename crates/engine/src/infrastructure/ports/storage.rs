//! Storage port traits: settings slots, baseline document, legacy cache.

use async_trait::async_trait;
use serde_json::Value;

use grc_domain::CategoryTree;

use super::error::{BaselineError, StoreError};

// =============================================================================
// Settings Storage
// =============================================================================

/// The host's key/value settings store.
///
/// Injected at construction so tests can substitute an in-memory fake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

// =============================================================================
// Baseline Document
// =============================================================================

/// Source of the shipped baseline category tree.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BaselineSource: Send + Sync {
    async fn fetch(&self) -> Result<CategoryTree, BaselineError>;

    /// Human readable location for logs.
    fn location(&self) -> String;
}

// =============================================================================
// Legacy Cache
// =============================================================================

/// Per-user local cache from before the shared settings store existed.
pub trait LegacyCache: Send + Sync {
    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}
