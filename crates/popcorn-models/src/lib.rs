pub mod movie_detail;
pub mod rating;
pub mod search_result;
pub mod summary;
pub mod watched;

pub use movie_detail::{parse_imdb_rating, parse_runtime_minutes, MovieDetail};
pub use rating::RatingDraft;
pub use search_result::SearchResult;
pub use summary::WatchedSummary;
pub use watched::WatchedEntry;
