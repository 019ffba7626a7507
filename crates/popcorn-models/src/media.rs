use serde::{Deserialize, Serialize};

/// IMDb identifier as used by OMDb (e.g. `tt0372784`)
pub type MovieId = String;

/// One row of a title search, in the order the provider returned it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
}

/// Full record for a single title
///
/// Fields the provider reports as "N/A" are `None`. Never cached: a fresh
/// detail is fetched every time the selection changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub imdb_rating: Option<f64>,
    pub plot: Option<String>,
    pub release_date: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<String>,
}

impl MovieDetail {
    /// Summary view of this detail, used when a detail is rendered in a list
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}
