use crate::display::{movie_title, DisplaySurface, DEFAULT_TITLE};
use crate::fetch::InFlight;
use crate::selection::SelectionController;
use crate::watched::{WatchedError, WatchedListStore};
use popcorn_models::{MovieDetail, MovieId, UserRating, WatchedEntry};
use popcorn_sources::{MovieProvider, ProviderError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DetailsError {
    #[error("no movie is open")]
    NoSelection,
    #[error("movie details have not loaded yet")]
    NotLoaded,
    #[error("{0} is already in the watched list")]
    AlreadyWatched(MovieId),
    #[error("pick a rating first")]
    NoRating,
    #[error(transparent)]
    Watched(#[from] WatchedError),
}

/// Detail view for the selected movie, plus the rating being composed for it.
///
/// Opening a movie acquires a detail fetch, and once it loads, the display
/// title. Leaving that movie (closing, or selecting another) releases both.
pub struct DetailsViewModel {
    provider: Arc<dyn MovieProvider>,
    surface: Box<dyn DisplaySurface>,
    movie_id: Option<MovieId>,
    detail: Option<MovieDetail>,
    is_loading: bool,
    error: Option<String>,
    pending_rating: Option<UserRating>,
    revision_count: u32,
    in_flight: Option<InFlight<MovieDetail>>,
    title_shown: bool,
}

impl DetailsViewModel {
    pub fn new(provider: Arc<dyn MovieProvider>, surface: Box<dyn DisplaySurface>) -> Self {
        Self {
            provider,
            surface,
            movie_id: None,
            detail: None,
            is_loading: false,
            error: None,
            pending_rating: None,
            revision_count: 0,
            in_flight: None,
            title_shown: false,
        }
    }

    /// Follow the current selection. Returns whether the open movie changed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn sync_selection(&mut self, selected: Option<&str>) -> bool {
        if self.movie_id.as_deref() == selected {
            return false;
        }

        self.release();
        if let Some(id) = selected {
            self.acquire(id);
        }
        true
    }

    fn acquire(&mut self, id: &str) {
        self.movie_id = Some(id.to_string());
        self.is_loading = true;

        let provider = Arc::clone(&self.provider);
        let id = id.to_string();
        self.in_flight = Some(InFlight::spawn(format!("details {}", id), async move {
            provider.get_by_id(&id).await
        }));
    }

    fn release(&mut self) {
        self.in_flight = None;
        if self.title_shown {
            self.surface.set_title(DEFAULT_TITLE);
            self.title_shown = false;
        }
        if let Some(id) = self.movie_id.take() {
            debug!("Released details for {}", id);
        }
        self.detail = None;
        self.is_loading = false;
        self.error = None;
        self.pending_rating = None;
        self.revision_count = 0;
    }

    /// Wait for the pending detail fetch, if any, and apply it.
    ///
    /// Cancel-safe. Returns whether state changed.
    pub async fn settle(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return false;
        };
        let outcome = in_flight.join().await;
        self.in_flight = None;

        match outcome {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, outcome: Result<MovieDetail, ProviderError>) {
        self.is_loading = false;
        match outcome {
            Ok(detail) => {
                debug!("Loaded details for {} ({})", detail.id, detail.title);
                self.surface.set_title(&movie_title(&detail.title));
                self.title_shown = true;
                self.detail = Some(detail);
                self.error = None;
            }
            Err(e) => {
                debug!("Failed to load details for {:?}: {}", self.movie_id, e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_watched(&self, watched: &WatchedListStore) -> bool {
        self.movie_id.as_deref().is_some_and(|id| watched.contains(id))
    }

    /// Rating given when the open movie was added to the watched list
    pub fn prior_user_rating(&self, watched: &WatchedListStore) -> Option<UserRating> {
        self.movie_id.as_deref().and_then(|id| watched.user_rating(id))
    }

    /// Set the pending rating for the open, loaded, unwatched movie.
    ///
    /// Returns the revision count, which grows by one each time the pending
    /// value actually changes.
    pub fn set_rating(&mut self, rating: UserRating, watched: &WatchedListStore) -> Result<u32, DetailsError> {
        let detail = self.loaded()?;
        if watched.contains(&detail.id) {
            return Err(DetailsError::AlreadyWatched(detail.id.clone()));
        }

        if self.pending_rating != Some(rating) {
            self.pending_rating = Some(rating);
            self.revision_count += 1;
            debug!("Pending rating {} (revision {})", rating, self.revision_count);
        }
        Ok(self.revision_count)
    }

    /// Add the open movie to the watched list with the pending rating, then
    /// close it.
    pub fn commit_rating(
        &mut self,
        watched: &mut WatchedListStore,
        selection: &mut SelectionController,
    ) -> Result<WatchedEntry, DetailsError> {
        let detail = self.loaded()?;
        if watched.contains(&detail.id) {
            return Err(DetailsError::AlreadyWatched(detail.id.clone()));
        }
        let rating = self.pending_rating.ok_or(DetailsError::NoRating)?;

        let entry = WatchedEntry::from_detail(detail, rating, self.revision_count);
        watched.add(entry.clone())?;
        debug!(
            "Rated {} ({}) {}/10 after {} revisions",
            entry.title, entry.id, rating, entry.rating_revision_count
        );

        selection.close();
        self.sync_selection(selection.current());
        Ok(entry)
    }

    fn loaded(&self) -> Result<&MovieDetail, DetailsError> {
        if self.movie_id.is_none() {
            return Err(DetailsError::NoSelection);
        }
        self.detail.as_ref().ok_or(DetailsError::NotLoaded)
    }

    pub fn movie_id(&self) -> Option<&str> {
        self.movie_id.as_deref()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_rating(&self) -> Option<UserRating> {
        self.pending_rating
    }

    pub fn revision_count(&self) -> u32 {
        self.revision_count
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl Drop for DetailsViewModel {
    fn drop(&mut self) {
        self.release();
    }
}
