//! Provider construction from configuration
//!
//! Keeps the binary free of provider-specific wiring: it hands over the
//! loaded `Config` and gets back a shareable trait object.

use anyhow::Result;
use popcorn_config::Config;
use std::sync::Arc;
use tracing::debug;

use crate::{MovieProvider, OmdbClient};

/// Create the movie provider described by `config`
///
/// Fails when the configuration does not validate (e.g. no API key yet).
pub fn create_provider(config: &Config) -> Result<Arc<dyn MovieProvider>> {
    config.validate()?;

    let client = OmdbClient::new(config.omdb.api_key.clone(), config.omdb.base_url.clone());
    debug!("Created movie provider: {:?}", client);
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_requires_api_key() {
        let config = Config::default();
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_create_provider() {
        let mut config = Config::default();
        config.omdb.api_key = "abc123".to_string();

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "omdb");
    }
}
