pub mod media;
pub mod rating;
pub mod watched;

pub use media::{MovieDetail, MovieId, MovieSummary};
pub use rating::{RatingError, UserRating};
pub use watched::WatchedEntry;
