use crate::details::{DetailsError, DetailsViewModel};
use crate::display::DisplaySurface;
use crate::search::{QueryOutcome, SearchController};
use crate::selection::SelectionController;
use crate::summary::WatchedSummary;
use crate::watched::{WatchedError, WatchedListStore};
use popcorn_models::{UserRating, WatchedEntry};
use popcorn_sources::MovieProvider;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub min_query_length: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { min_query_length: 3 }
    }
}

/// One user's view of the app: search box, open movie, watched list.
///
/// Every operation that can move the selection re-syncs the detail view
/// before returning, so the view always reflects the current selection.
pub struct Session {
    search: SearchController,
    selection: SelectionController,
    details: DetailsViewModel,
    watched: WatchedListStore,
}

impl Session {
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        watched: WatchedListStore,
        surface: Box<dyn DisplaySurface>,
        options: SessionOptions,
    ) -> Self {
        debug!(
            "Session started with {} ({} watched)",
            provider.provider_name(),
            watched.len()
        );
        Self {
            search: SearchController::new(Arc::clone(&provider), options.min_query_length),
            selection: SelectionController::new(),
            details: DetailsViewModel::new(provider, surface),
            watched,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> QueryOutcome {
        let outcome = self.search.set_query(query, &mut self.selection);
        self.sync_details();
        outcome
    }

    pub fn clear_query(&mut self) -> QueryOutcome {
        self.set_query(String::new())
    }

    /// Toggle `id` open or closed; returns the selection afterwards
    pub fn select(&mut self, id: &str) -> Option<&str> {
        self.selection.select(id);
        self.sync_details();
        self.selection.current()
    }

    /// Toggle the search result at `index`. Returns false when there is no
    /// such result.
    pub fn select_result(&mut self, index: usize) -> bool {
        let Some(id) = self.search.results().get(index).map(|r| r.id.clone()) else {
            return false;
        };
        self.select(&id);
        true
    }

    pub fn close(&mut self) {
        self.selection.close();
        self.sync_details();
    }

    pub fn set_rating(&mut self, rating: UserRating) -> Result<u32, DetailsError> {
        self.details.set_rating(rating, &self.watched)
    }

    pub fn commit_rating(&mut self) -> Result<WatchedEntry, DetailsError> {
        self.details.commit_rating(&mut self.watched, &mut self.selection)
    }

    pub fn remove_watched(&mut self, id: &str) -> Result<usize, WatchedError> {
        self.watched.remove(id)
    }

    pub fn clear_watched(&mut self) -> Result<usize, WatchedError> {
        self.watched.clear()
    }

    fn sync_details(&mut self) {
        self.details.sync_selection(self.selection.current());
    }

    /// Whether any fetch is still outstanding
    pub fn is_busy(&self) -> bool {
        self.search.is_pending() || self.details.is_pending()
    }

    /// Wait for the next outstanding fetch to settle and apply it.
    ///
    /// Returns false immediately when nothing is pending. Cancel-safe.
    pub async fn settle(&mut self) -> bool {
        let search_pending = self.search.is_pending();
        let details_pending = self.details.is_pending();

        tokio::select! {
            changed = self.search.settle(), if search_pending => changed,
            changed = self.details.settle(), if details_pending => changed,
            else => false,
        }
    }

    /// Settle until nothing is outstanding
    pub async fn settle_all(&mut self) {
        while self.is_busy() {
            self.settle().await;
        }
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(self.watched.entries())
    }

    pub fn is_open_movie_watched(&self) -> bool {
        self.details.is_watched(&self.watched)
    }

    pub fn prior_user_rating(&self) -> Option<UserRating> {
        self.details.prior_user_rating(&self.watched)
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.current()
    }

    pub fn details(&self) -> &DetailsViewModel {
        &self.details
    }

    pub fn watched(&self) -> &WatchedListStore {
        &self.watched
    }
}
