pub mod traits;
pub mod factory;
pub mod omdb;
pub mod error;

pub use traits::MovieProvider;
pub use factory::create_provider;
pub use error::ProviderError;
pub use omdb::OmdbClient;
