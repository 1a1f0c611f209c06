//! Durable key/value storage for the theme preference
//!
//! Mirrors the browser's local storage: string keys, string values, and a
//! store that may be missing or broken without that being fatal.

use log::{debug, warn};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Error type for storage write failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Storage is unavailable")]
    Unavailable,
}

/// Client-persistent key/value store surviving across sessions.
pub trait ThemeStorage {
    /// Returns the stored value, or `None` when absent or unreadable.
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    items: HashMap<String, String>,
    read_only: bool,
}

/// In-process storage. Clones share the same items.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a storage pre-populated with a single item.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .state
            .borrow_mut()
            .items
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Returns a storage that rejects every write, like a browser with
    /// storage disabled.
    pub fn read_only() -> Self {
        let storage = Self::new();
        storage.state.borrow_mut().read_only = true;
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.state.borrow().items.get(key).cloned()
    }
}

impl ThemeStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.read_only {
            return Err(StorageError::Unavailable);
        }
        state.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object file on disk.
///
/// Every access goes to the file, so several processes see each other's
/// writes. A missing or malformed file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Map<String, Value> {
        if !self.path.exists() {
            return Map::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read storage file {}: {e}", self.path.display());
                return Map::new();
            }
        };
        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Ignoring malformed storage file {}: {e}",
                    self.path.display()
                );
                Map::new()
            }
        }
    }
}

impl ThemeStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_items()
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_items();
        items.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!("Created storage directory: {}", parent.display());
            }
        }

        let content = serde_json::to_string_pretty(&items)?;
        fs::write(&self.path, content)?;
        debug!("Stored {key}={value} in {}", self.path.display());
        Ok(())
    }
}
