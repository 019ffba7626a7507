use crate::error::ProviderError;
use crate::omdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use popcorn_models::{MovieDetail, MovieSummary};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn create_omdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Arc::new(create_omdb_client()),
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api key stays out of logs
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, ProviderError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, ProviderError> {
        api::get_title(&self.client, &self.base_url, &self.api_key, id).await
    }
}
