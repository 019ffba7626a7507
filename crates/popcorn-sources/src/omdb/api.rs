use crate::error::ProviderError;
use popcorn_models::{MovieDetail, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

/// OMDb wraps every answer in `{"Response": "True" | "False", ...}`
#[derive(Debug, Deserialize)]
#[serde(tag = "Response")]
enum OmdbEnvelope<T> {
    #[serde(rename = "True")]
    Found(T),
    #[serde(rename = "False")]
    Failed {
        #[serde(rename = "Error", default = "default_failure_message")]
        error: String,
    },
}

fn default_failure_message() -> String {
    "Unknown error".to_string()
}

#[derive(Debug, Deserialize)]
struct OmdbSearchPage {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbTitle {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Released", default)]
    released: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Actors", default)]
    actors: Option<String>,
}

/// OMDb spells missing values as "N/A"
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "N/A"
    })
}

/// "148 min" -> 148
pub fn parse_runtime(runtime: &str) -> Option<u32> {
    runtime.split_whitespace().next()?.parse().ok()
}

/// "8.8" -> 8.8, "N/A" -> None
pub fn parse_rating(rating: &str) -> Option<f64> {
    rating.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

fn decode<T>(body: &str) -> Result<T, ProviderError>
where
    T: for<'de> Deserialize<'de>,
{
    match serde_json::from_str::<OmdbEnvelope<T>>(body) {
        Ok(OmdbEnvelope::Found(payload)) => Ok(payload),
        Ok(OmdbEnvelope::Failed { error }) => Err(ProviderError::Rejected(error)),
        Err(e) => {
            warn!("Failed to decode OMDb response: {}", e);
            Err(ProviderError::Decode(e.to_string()))
        }
    }
}

pub fn decode_search(body: &str) -> Result<Vec<MovieSummary>, ProviderError> {
    let page: OmdbSearchPage = decode(body)?;
    Ok(page
        .search
        .into_iter()
        .map(|item| MovieSummary {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: available(item.poster),
        })
        .collect())
}

pub fn decode_title(body: &str) -> Result<MovieDetail, ProviderError> {
    let title: OmdbTitle = decode(body)?;
    Ok(MovieDetail {
        id: title.imdb_id,
        title: title.title,
        year: title.year,
        poster_url: available(title.poster),
        runtime_minutes: available(title.runtime).as_deref().and_then(parse_runtime),
        imdb_rating: available(title.imdb_rating).as_deref().and_then(parse_rating),
        plot: available(title.plot),
        release_date: available(title.released),
        director: available(title.director),
        genre: available(title.genre),
        actors: available(title.actors),
    })
}

async fn fetch_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, ProviderError> {
    let response = client
        .get(base_url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ProviderError::transport(Some(status.as_u16()), error_text));
    }

    Ok(response.text().await?)
}

/// Search titles by substring (`?s=`)
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<MovieSummary>, ProviderError> {
    debug!("Searching OMDb for {:?}", query);
    let body = fetch_body(client, base_url, &[("apikey", api_key), ("s", query)]).await?;
    let results = decode_search(&body)?;
    debug!("OMDb returned {} results for {:?}", results.len(), query);
    Ok(results)
}

/// Fetch one title by IMDb id (`?i=`)
pub async fn get_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, ProviderError> {
    debug!("Fetching OMDb title {}", id);
    let body = fetch_body(client, base_url, &[("apikey", api_key), ("i", id)]).await?;
    decode_title(&body)
}
