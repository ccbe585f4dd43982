//! File-backed legacy cache.
//!
//! Before the shared settings store existed, each user kept custom actions in
//! a local string map. The file holds that map as JSON so the one-time
//! migration can read it.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::infrastructure::ports::LegacyCache;

pub struct FileLegacyCache {
    /// Path to the cache file
    path: PathBuf,
    /// In-memory copy of the stored values
    cache: RwLock<HashMap<String, String>>,
}

impl FileLegacyCache {
    /// Open the cache file. A missing or unreadable file behaves as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let cache = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!("Failed to parse legacy cache file: {}", e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read legacy cache file: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("Legacy cache opened at: {:?}", path);

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    /// Write the cache back to disk
    fn persist(&self) {
        let cache = match self.cache.read() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::error!("Failed to acquire read lock for legacy cache: {}", e);
                return;
            }
        };

        match serde_json::to_string_pretty(&*cache) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.path, data) {
                    tracing::error!("Failed to write legacy cache file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize legacy cache: {}", e);
            }
        }
    }
}

impl LegacyCache for FileLegacyCache {
    fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for legacy cache: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                if guard.remove(key).is_none() {
                    return;
                }
                drop(guard); // Release lock before I/O
                self.persist();
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for legacy cache: {}", e);
            }
        }
    }
}
