use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage key holding the serialized watchlist array
pub const WATCHLIST_KEY: &str = "watchlist";
/// Storage key holding the last active page cursor
pub const CURRENT_PAGE_KEY: &str = "currentPage";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed storage of JSON text, modeled on browser local storage.
///
/// Values are written whole on every call; there is no batching and the last
/// writer wins.
pub trait PersistedStore: Send {
    /// Raw JSON text stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl PersistedStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten atomically on each change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable one is
    /// backed up next to the original and replaced by an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let path = path.to_path_buf();
        if !path.exists() {
            debug!("Storage file {:?} does not exist, starting empty", path);
            return Ok(Self { path, items: BTreeMap::new() });
        }

        let content = std::fs::read_to_string(&path)?;
        let items = match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
            Ok(items) => items,
            Err(e) => {
                let backup_path = path.with_extension("json.bak");
                match std::fs::copy(&path, &backup_path) {
                    Ok(_) => info!(
                        "Storage file is corrupted ({}). Backed up to {:?} and starting empty.",
                        e, backup_path
                    ),
                    Err(backup_err) => warn!(
                        "Storage file is corrupted ({}) and backup failed: {}. Starting empty.",
                        e, backup_err
                    ),
                }
                BTreeMap::new()
            }
        };

        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl PersistedStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).map(Value::to_string)
    }

    /// The in-memory copy only changes once the file write succeeds.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let value: Value = serde_json::from_str(value)?;
        let mut items = self.items.clone();
        items.insert(key.to_string(), value);
        self.flush(&items)?;
        self.items = items;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.clone();
        items.remove(key);
        self.flush(&items)?;
        self.items = items;
        Ok(())
    }
}
