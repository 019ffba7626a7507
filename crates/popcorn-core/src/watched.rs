use crate::store::{KeyValueStore, StoreError};
use popcorn_models::{UserRating, WatchedEntry};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum WatchedError {
    #[error("{0} is already in the watched list")]
    AlreadyWatched(String),
    #[error("failed to persist watched list: {0}")]
    Store(#[from] StoreError),
    #[error("failed to serialize watched list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The user's watched movies, written through to a key-value store
///
/// Every mutation serializes the full list and writes it under one key
/// before the in-memory list is replaced. If the write fails, neither side
/// changes.
pub struct WatchedListStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    entries: Vec<WatchedEntry>,
}

impl WatchedListStore {
    /// Empty list bound to `key`; call [`hydrate`](Self::hydrate) to load it
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            entries: Vec::new(),
        }
    }

    /// Create and hydrate in one step
    pub fn open(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut watched = Self::new(store, key);
        watched.hydrate();
        watched
    }

    /// Load the persisted snapshot, replacing the in-memory list.
    ///
    /// Missing, unreadable or malformed snapshots all yield an empty list;
    /// nothing is propagated to the caller. A malformed snapshot is first
    /// copied to [`backup_key`](Self::backup_key) so the next write cannot
    /// destroy it. Returns the number of entries loaded.
    pub fn hydrate(&mut self) -> usize {
        self.entries = match self.store.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Option<Vec<WatchedEntry>>>(&raw) {
                Ok(entries) => entries.unwrap_or_default(),
                Err(e) => {
                    let backup_key = self.backup_key();
                    match self.store.set(&backup_key, raw) {
                        Ok(()) => warn!(
                            "Watched list snapshot under {:?} is malformed ({}). Backed up to {:?} and starting empty.",
                            self.key, e, backup_key
                        ),
                        Err(backup_err) => warn!(
                            "Watched list snapshot under {:?} is malformed ({}) and could not be backed up: {}. Starting empty.",
                            self.key, e, backup_err
                        ),
                    }
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No watched list snapshot under {:?} yet", self.key);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read watched list snapshot under {:?}: {}", self.key, e);
                Vec::new()
            }
        };

        debug!("Hydrated {} watched entries", self.entries.len());
        self.entries.len()
    }

    /// Append an entry. Ids are unique: adding a watched id is rejected.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), WatchedError> {
        if self.contains(&entry.id) {
            return Err(WatchedError::AlreadyWatched(entry.id));
        }

        let mut next = self.entries.clone();
        let id = entry.id.clone();
        next.push(entry);
        self.persist(next)?;
        debug!("Added {} to watched list ({} entries)", id, self.entries.len());
        Ok(())
    }

    /// Remove every entry with `id`, returning how many were removed
    pub fn remove(&mut self, id: &str) -> Result<usize, WatchedError> {
        let next: Vec<WatchedEntry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        let removed = self.entries.len() - next.len();
        self.persist(next)?;
        if removed > 0 {
            debug!("Removed {} from watched list ({} entries)", id, self.entries.len());
        } else {
            debug!("Remove of {} matched no watched entries", id);
        }
        Ok(removed)
    }

    /// Drop every entry
    pub fn clear(&mut self) -> Result<usize, WatchedError> {
        let removed = self.entries.len();
        self.persist(Vec::new())?;
        debug!("Cleared watched list ({} entries removed)", removed);
        Ok(removed)
    }

    fn persist(&mut self, next: Vec<WatchedEntry>) -> Result<(), WatchedError> {
        let snapshot = serde_json::to_string(&next)?;
        self.store.set(&self.key, snapshot)?;
        self.entries = next;
        Ok(())
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn user_rating(&self, id: &str) -> Option<UserRating> {
        self.get(id).map(|e| e.user_rating)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where a malformed snapshot is kept
    pub fn backup_key(&self) -> String {
        format!("{}.bak", self.key)
    }
}

#[cfg(test)]
mod tests;
