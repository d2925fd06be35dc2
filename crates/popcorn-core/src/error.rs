use thiserror::Error;

/// Operations the controller refuses, plus persistence failures
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("No movie is selected")]
    NothingSelected,

    #[error("Movie details are not loaded yet")]
    DetailNotLoaded,

    #[error("Choose a rating before adding the movie")]
    NoRating,

    #[error("Rating must be between 1 and {max} (got {rating})")]
    InvalidRating { rating: u8, max: u8 },

    #[error("{0} is already in the watched list")]
    AlreadyWatched(String),

    #[error("Failed to save the watched list: {0}")]
    Persist(#[from] anyhow::Error),
}
