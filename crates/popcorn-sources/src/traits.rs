use async_trait::async_trait;
use popcorn_models::{MovieDetail, MovieSummary};
use crate::error::ProviderError;

#[async_trait]
pub trait MovieProvider: Send + Sync {
    // Source metadata
    fn provider_name(&self) -> &str;

    /// Titles containing `query`, in the provider's order
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, ProviderError>;

    /// Full record for one id
    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, ProviderError>;
}
