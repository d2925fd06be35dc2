use serde::{Deserialize, Serialize};

/// Full catalog record for a single movie, fetched fresh per selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Runtime as reported by the catalog, e.g. "148 min"
    pub runtime: String,
    pub runtime_minutes: u32,
    pub imdb_rating: f64,
    pub plot: String,
    pub release_date: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

/// Parse the leading integer of a catalog runtime ("148 min" -> 148).
///
/// Anything without a leading number ("N/A", empty) counts as 0.
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    runtime
        .split_whitespace()
        .next()
        .and_then(|first| first.parse::<u32>().ok())
        .unwrap_or(0)
}

/// Parse a catalog rating string ("9.0"); "N/A" and garbage count as 0.0.
pub fn parse_imdb_rating(rating: &str) -> f64 {
    rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_minutes() {
        assert_eq!(parse_runtime_minutes("148 min"), 148);
        assert_eq!(parse_runtime_minutes("90"), 90);
        assert_eq!(parse_runtime_minutes("N/A"), 0);
        assert_eq!(parse_runtime_minutes(""), 0);
        assert_eq!(parse_runtime_minutes("  152 min"), 152);
    }

    #[test]
    fn test_parse_imdb_rating() {
        assert_eq!(parse_imdb_rating("9.0"), 9.0);
        assert_eq!(parse_imdb_rating(" 7.5 "), 7.5);
        assert_eq!(parse_imdb_rating("N/A"), 0.0);
        assert_eq!(parse_imdb_rating("NaN"), 0.0);
    }
}
