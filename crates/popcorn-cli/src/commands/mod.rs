pub mod clear;
pub mod config;
pub mod interactive;
pub mod prompts;
pub mod rate;
pub mod search;
pub mod show;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::{Report, Result};
use popcorn_config::{Config, PathManager};
use popcorn_core::{DisplaySurface, FileStore, Session, SessionOptions, WatchedListStore};
use popcorn_sources::create_provider;

/// Resolved paths and configuration shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        Self::load_from(PathManager::default())
    }

    pub fn load_from(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?;
        Ok(Self { paths, config })
    }

    /// Like [`load`](Self::load), but an unreadable config file yields the
    /// defaults plus the load error, so `config` subcommands can repair it.
    pub fn load_lenient() -> (Self, Option<Report>) {
        Self::load_lenient_from(PathManager::default())
    }

    pub fn load_lenient_from(paths: PathManager) -> (Self, Option<Report>) {
        match Self::load_from(paths.clone()) {
            Ok(ctx) => (ctx, None),
            Err(e) => {
                let mut config = Config::default();
                config.apply_env_overrides();
                (Self { paths, config }, Some(e))
            }
        }
    }

    /// Watched list backed by the local storage file
    pub fn open_watched(&self) -> Result<WatchedListStore> {
        let store = FileStore::open(self.paths.storage_file())?;
        Ok(WatchedListStore::open(Box::new(store), self.config.storage.watched_key.clone()))
    }

    /// Session talking to the configured provider.
    /// Fails when the OMDb API key is missing.
    pub fn session(&self, surface: Box<dyn DisplaySurface>) -> Result<Session> {
        let provider = create_provider(&self.config).map_err(|e| eyre!("{:#}", e))?;
        let options = SessionOptions {
            min_query_length: self.config.search.min_query_length,
        };
        Ok(Session::new(provider, self.open_watched()?, surface, options))
    }
}
