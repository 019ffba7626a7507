use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OMDB_API_KEY";
/// Environment variable that overrides `omdb.api_key` from the config file
pub const API_KEY_ENV: &str = "POPCORN_OMDB_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchOptions,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Queries shorter than this never reach the provider
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the watched-list snapshot is stored under
    #[serde(default = "default_watched_key")]
    pub watched_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_base_url() -> String {
    DEFAULT_OMDB_URL.to_string()
}

fn default_min_query_length() -> usize {
    3
}

fn default_watched_key() -> String {
    "watched".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            watched_key: default_watched_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise start from defaults.
    /// The API key environment variable is applied on top either way.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.omdb.api_key = key.trim().to_string();
            }
        }
    }

    pub fn is_omdb_configured(&self) -> bool {
        let key = self.omdb.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_omdb_configured() {
            return Err(anyhow::anyhow!(
                "OMDb api_key is not configured (run 'popcorn config set-api-key <KEY>' or set {})",
                API_KEY_ENV
            ));
        }

        if !self.omdb.base_url.starts_with("http://") && !self.omdb.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", self.omdb.base_url));
        }

        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }

        if self.storage.watched_key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.watched_key cannot be empty"));
        }

        Ok(())
    }
}
