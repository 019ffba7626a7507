//! Shared fixtures for the controller tests

use crate::display::DisplaySurface;
use crate::store::{KeyValueStore, StoreError};
use async_trait::async_trait;
use popcorn_models::{MovieDetail, MovieSummary, UserRating, WatchedEntry};
use popcorn_sources::{MovieProvider, ProviderError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn summary(id: &str, title: &str, year: &str) -> MovieSummary {
    MovieSummary {
        id: id.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        poster_url: None,
    }
}

pub fn detail(id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster_url: Some(format!("https://posters.example/{}.jpg", id)),
        runtime_minutes: Some(140),
        imdb_rating: Some(8.2),
        plot: Some("A plot.".to_string()),
        release_date: Some("15 Jun 2005".to_string()),
        director: Some("Christopher Nolan".to_string()),
        genre: Some("Action".to_string()),
        actors: Some("Christian Bale".to_string()),
    }
}

pub fn entry(id: &str, user_rating: u8) -> WatchedEntry {
    WatchedEntry::from_detail(&detail(id, id), UserRating::new(user_rating).unwrap(), 0)
}

pub fn rating(value: u8) -> UserRating {
    UserRating::new(value).unwrap()
}

/// Provider answering from fixed tables.
///
/// A request for a gated key blocks until [`release`](Self::release) is
/// called for it, which lets tests decide the order in which requests settle.
#[derive(Default)]
pub struct ScriptedProvider {
    searches: Mutex<HashMap<String, Result<Vec<MovieSummary>, ProviderError>>>,
    details: Mutex<HashMap<String, Result<MovieDetail, ProviderError>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, query: &str, result: Result<Vec<MovieSummary>, ProviderError>) -> Self {
        self.searches.lock().unwrap().insert(query.to_string(), result);
        self
    }

    pub fn with_detail(self, id: &str, result: Result<MovieDetail, ProviderError>) -> Self {
        self.details.lock().unwrap().insert(id.to_string(), result);
        self
    }

    pub fn gated(self, key: &str) -> Self {
        self.gates.lock().unwrap().insert(key.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(key) {
            gate.notify_one();
        }
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    async fn wait_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl MovieProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, ProviderError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        self.wait_gate(query).await;
        self.searches
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::Rejected("Movie not found!".to_string())))
    }

    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, ProviderError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        self.wait_gate(id).await;
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::Rejected("Incorrect IMDb ID.".to_string())))
    }
}

/// Surface that remembers every title it was given
#[derive(Clone, Default)]
pub struct RecordingSurface {
    titles: Arc<Mutex<Vec<String>>>,
}

impl RecordingSurface {
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.titles.lock().unwrap().last().cloned()
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_title(&mut self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }
}

/// Store whose writes can be switched off
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: crate::store::MemoryStore,
    fail_writes: Arc<Mutex<bool>>,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        *self.fail_writes.lock().unwrap() = failing;
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}
