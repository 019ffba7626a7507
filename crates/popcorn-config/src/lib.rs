pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, SearchOptions, StorageConfig, API_KEY_ENV, DEFAULT_OMDB_URL, PLACEHOLDER_API_KEY};
pub use paths::{PathManager, container_base_path};
