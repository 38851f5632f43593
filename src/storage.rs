//! Small key/value store for client preferences.
//!
//! Native builds keep one file per key under the platform data directory;
//! WASM builds keep values in memory for the page lifetime.

use crate::error::StorageError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Sanitize storage key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<data dir>/medica/preferences`, or `cache/preferences` when the
    /// platform has no data directory.
    pub fn default_location() -> Self {
        match dirs::data_local_dir() {
            Some(data_dir) => Self::new(data_dir.join("medica").join("preferences")),
            None => Self::new(PathBuf::from("cache").join("preferences")),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.txt", sanitize_key(key)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key))
            .ok()
            .map(|value| value.trim().to_string())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

static SHARED_MEMORY: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Process-wide in-memory store.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryStore;

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = SHARED_MEMORY.lock().ok()?;
        values.get(&sanitize_key(key)).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = SHARED_MEMORY
            .lock()
            .map_err(|_| StorageError::Unavailable)?;
        values.insert(sanitize_key(key), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_store(data_dir: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    match data_dir {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(FileStore::default_location()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store(_data_dir: Option<std::path::PathBuf>) -> Box<dyn PreferenceStore> {
    Box::new(MemoryStore)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("theme"), "theme");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore;
        assert_eq!(store.get("memory-store-unit"), None);
        store.set("memory-store-unit", "dark").unwrap();
        assert_eq!(store.get("memory-store-unit").as_deref(), Some("dark"));
    }
}
