pub mod store;
pub mod watched;
pub mod selection;
pub mod fetch;
pub mod search;
pub mod details;
pub mod display;
pub mod summary;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use watched::{WatchedError, WatchedListStore};
pub use selection::SelectionController;
pub use search::{QueryOutcome, SearchController, SearchState};
pub use details::{DetailsError, DetailsViewModel};
pub use display::{DisplaySurface, NullSurface, DEFAULT_TITLE};
pub use summary::{average, WatchedSummary};
pub use session::{Session, SessionOptions};
