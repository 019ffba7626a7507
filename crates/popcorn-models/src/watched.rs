use crate::media::{MovieDetail, MovieId};
use crate::rating::UserRating;
use serde::{Deserialize, Serialize};

/// A movie the user rated and kept in their watched list
///
/// Serialized with the same keys the browser snapshot used, so an exported
/// `watched` value from local storage hydrates unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: MovieId,
    pub title: String,
    pub year: String,
    #[serde(rename = "poster", default)]
    pub poster_url: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<f64>,
    #[serde(rename = "runtime", default)]
    pub runtime_minutes: Option<u32>,
    #[serde(rename = "userRating")]
    pub user_rating: UserRating,
    /// How many times the pending rating changed before it was committed
    #[serde(rename = "userRatingDecision", default)]
    pub rating_revision_count: u32,
}

impl WatchedEntry {
    pub fn from_detail(detail: &MovieDetail, user_rating: UserRating, rating_revision_count: u32) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            imdb_rating: detail.imdb_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating,
            rating_revision_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browser_snapshot_entry() {
        let json = r#"{
            "imdbID": "tt0372784",
            "title": "Batman Begins",
            "year": "2005",
            "poster": "https://m.media-amazon.com/images/M/batman.jpg",
            "imdbRating": 8.2,
            "runtime": 140,
            "userRating": 9,
            "userRatingDecision": 2
        }"#;

        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "tt0372784");
        assert_eq!(entry.runtime_minutes, Some(140));
        assert_eq!(entry.user_rating.value(), 9);
        assert_eq!(entry.rating_revision_count, 2);
    }

    #[test]
    fn test_nan_rating_from_browser_becomes_none() {
        // JSON.stringify(NaN) is null
        let json = r#"{"imdbID":"tt1","title":"Obscure","year":"1999","poster":"N/A","imdbRating":null,"runtime":null,"userRating":4}"#;

        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.imdb_rating, None);
        assert_eq!(entry.runtime_minutes, None);
        assert_eq!(entry.rating_revision_count, 0);
    }

    #[test]
    fn test_from_detail() {
        let detail = MovieDetail {
            id: "tt0468569".to_string(),
            title: "The Dark Knight".to_string(),
            year: "2008".to_string(),
            poster_url: None,
            runtime_minutes: Some(152),
            imdb_rating: Some(9.0),
            plot: None,
            release_date: None,
            director: Some("Christopher Nolan".to_string()),
            genre: None,
            actors: None,
        };

        let entry = WatchedEntry::from_detail(&detail, UserRating::new(10).unwrap(), 1);
        assert_eq!(entry.id, detail.id);
        assert_eq!(entry.runtime_minutes, Some(152));
        assert_eq!(entry.user_rating.value(), 10);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["imdbID"], "tt0468569");
        assert_eq!(json["userRating"], 10);
        assert_eq!(json["userRatingDecision"], 1);
    }
}
