use thiserror::Error;

/// Failures surfaced by a movie catalog.
///
/// `Display` is the message shown to the user; transport details stay in the payload for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure or non-success HTTP status
    #[error("Something went wrong with fetching movies")]
    Network(String),

    /// Well-formed response that signals no match, carrying the catalog's message
    #[error("{0}")]
    NotFound(String),

    /// Body could not be decoded as a catalog response
    #[error("Unexpected response from the movie catalog")]
    Decode(String),
}

impl CatalogError {
    /// Underlying detail for logging
    pub fn detail(&self) -> &str {
        match self {
            CatalogError::Network(detail) | CatalogError::NotFound(detail) | CatalogError::Decode(detail) => detail,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let network = CatalogError::Network("connection refused".to_string());
        assert_eq!(network.to_string(), "Something went wrong with fetching movies");
        assert_eq!(network.detail(), "connection refused");

        let not_found = CatalogError::NotFound("Movie not found!".to_string());
        assert_eq!(not_found.to_string(), "Movie not found!");
        assert!(not_found.is_not_found());
    }
}
