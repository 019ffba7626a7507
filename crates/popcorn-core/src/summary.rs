use popcorn_models::WatchedEntry;
use serde::Serialize;

/// Arithmetic mean, 0 for an empty input
pub fn average(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values.into_iter().fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Aggregate view of the watched list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

impl WatchedSummary {
    /// Entries with an unknown IMDb rating or runtime are left out of that
    /// average only.
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_imdb_rating: average(entries.iter().filter_map(|e| e.imdb_rating)),
            avg_user_rating: average(entries.iter().map(|e| f64::from(e.user_rating.value()))),
            avg_runtime_minutes: average(entries.iter().filter_map(|e| e.runtime_minutes.map(f64::from))),
        }
    }
}
