use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// String-keyed store that survives restarts
///
/// `set` is synchronous: when it returns `Ok`, a later `get` of the same key
/// (in this process or the next) observes the new value.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. a snapshot left by a previous run
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// The whole object is rewritten on every `set` through a temp file and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`, creating it lazily on first write.
    /// A corrupt file is backed up next to the original and replaced by an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            debug!("Storage file {:?} does not exist yet, starting empty", path);
            return Ok(Self { path, values: Map::new() });
        }

        let content = std::fs::read_to_string(&path)?;
        let values = match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(values) => values,
            Err(e) => {
                let backup_path = path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&path, &backup_path) {
                    warn!(
                        "Storage file {:?} is corrupt ({}) and could not be backed up: {}. Starting empty.",
                        path, e, backup_err
                    );
                } else {
                    warn!(
                        "Storage file {:?} is corrupt ({}). Backed up to {:?} and starting empty.",
                        path, e, backup_path
                    );
                }
                Map::new()
            }
        };

        debug!("Opened storage file {:?} ({} keys)", path, values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.values)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        // Values are stored as JSON strings, the same shape local storage has
        Ok(self.values.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let previous = self.values.insert(key.to_string(), Value::String(value));
        if let Err(e) = self.flush() {
            // Keep memory in line with what is on disk
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        debug!("Stored key {:?} in {:?}", key, self.path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if let Some(previous) = self.values.remove(key) {
            if let Err(e) = self.flush() {
                self.values.insert(key.to_string(), previous);
                return Err(e);
            }
            debug!("Removed key {:?} from {:?}", key, self.path);
        }
        Ok(())
    }
}
