use crate::fetch::InFlight;
use crate::selection::SelectionController;
use popcorn_models::MovieSummary;
use popcorn_sources::{MovieProvider, ProviderError};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Observable state of the search box and its result list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<MovieSummary>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// What a query change did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Same query as before, nothing re-evaluated
    Unchanged,
    /// Below the minimum length: results and error cleared, no request
    TooShort,
    /// A request was issued; call `settle` to apply it
    Fetching,
}

/// Owns the query and the result list derived from it.
///
/// At most one search is in flight. Issuing a new one drops (and so aborts)
/// the previous request, which makes stale results impossible to commit.
/// The in-flight request owns the loading flag: only its own settlement
/// clears it.
pub struct SearchController {
    provider: Arc<dyn MovieProvider>,
    min_query_length: usize,
    state: SearchState,
    in_flight: Option<InFlight<Vec<MovieSummary>>>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn MovieProvider>, min_query_length: usize) -> Self {
        Self {
            provider,
            min_query_length,
            state: SearchState::default(),
            in_flight: None,
        }
    }

    /// Update the query and re-run the fetch policy.
    ///
    /// Issuing a request closes the open selection. Must be called from
    /// within a Tokio runtime.
    pub fn set_query(&mut self, query: impl Into<String>, selection: &mut SelectionController) -> QueryOutcome {
        let query = query.into();
        if query == self.state.query {
            return QueryOutcome::Unchanged;
        }
        self.state.query = query;

        if self.state.query.chars().count() < self.min_query_length {
            // Leaving the fetching state releases any pending request
            self.in_flight = None;
            self.state.is_loading = false;
            self.state.error = None;
            self.state.results.clear();
            debug!("Query {:?} below {} characters, results cleared", self.state.query, self.min_query_length);
            return QueryOutcome::TooShort;
        }

        selection.close();
        self.state.is_loading = true;
        self.state.error = None;

        let provider = Arc::clone(&self.provider);
        let query = self.state.query.clone();
        // Replacing the old request drops it, which aborts it
        self.in_flight = Some(InFlight::spawn(format!("search {:?}", query), async move {
            provider.search(&query).await
        }));
        QueryOutcome::Fetching
    }

    /// Wait for the pending search, if any, and apply its outcome.
    ///
    /// Returns whether state changed. Cancel-safe, so it can be raced against
    /// user input in `tokio::select!`.
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

    fn apply(&mut self, outcome: Result<Vec<MovieSummary>, ProviderError>) {
        self.state.is_loading = false;
        match outcome {
            Ok(results) => {
                debug!("Search {:?} found {} results", self.state.query, results.len());
                self.state.results = results;
                self.state.error = None;
            }
            Err(e) => {
                debug!("Search {:?} failed: {}", self.state.query, e);
                self.state.results.clear();
                self.state.error = Some(e.to_string());
            }
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.state.results
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn min_query_length(&self) -> usize {
        self.min_query_length
    }
}

#[cfg(test)]
mod tests;
