use serde::{Deserialize, Serialize};

/// One catalog hit from a text search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String, // Catalog-assigned (imdbID), unique per entry
    pub title: String,
    pub year: String, // Kept as text: the catalog reports ranges like "2008–2013"
    pub poster_url: String,
}

impl SearchResult {
    /// The catalog uses "N/A" for entries without artwork
    pub fn has_poster(&self) -> bool {
        let trimmed = self.poster_url.trim();
        !trimmed.is_empty() && trimmed != "N/A"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(poster: &str) -> SearchResult {
        SearchResult {
            id: "tt0372784".to_string(),
            title: "Batman Begins".to_string(),
            year: "2005".to_string(),
            poster_url: poster.to_string(),
        }
    }

    #[test]
    fn test_has_poster() {
        assert!(result("https://m.media-amazon.com/images/M/batman.jpg").has_poster());
        assert!(!result("N/A").has_poster());
        assert!(!result("").has_poster());
        assert!(!result("  ").has_poster());
    }
}
