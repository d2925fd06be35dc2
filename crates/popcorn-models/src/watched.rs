use crate::movie_detail::{parse_imdb_rating, parse_runtime_minutes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A rated movie in the persisted watched list.
///
/// Field names on disk follow the stored list format (`imdbId`, `poster`, `runtime`, ...).
/// Older lists stored `runtime` as text ("152"), could hold `null` for a missing IMDb
/// rating, and spelled the counter `countRaTingDecisions`; all of those still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbId")]
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    #[serde(rename = "imdbRating", deserialize_with = "lenient_rating")]
    pub imdb_rating: f64,
    #[serde(rename = "runtime", deserialize_with = "lenient_minutes")]
    pub runtime_minutes: u32,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
    #[serde(rename = "countRatingDecisions", alias = "countRaTingDecisions", default)]
    pub rating_revision_count: u32,
    #[serde(rename = "watchedAt", default, skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<DateTime<Utc>>,
}

/// A stored number that may also arrive as text or `null`
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNumber {
    Number(f64),
    Text(String),
    Missing(Option<()>),
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredNumber::deserialize(deserializer)? {
        StoredNumber::Number(value) if value.is_finite() && value >= 0.0 => value as u32,
        StoredNumber::Text(text) => parse_runtime_minutes(&text),
        _ => 0,
    })
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredNumber::deserialize(deserializer)? {
        StoredNumber::Number(value) if value.is_finite() => value,
        StoredNumber::Text(text) => parse_imdb_rating(&text),
        _ => 0.0,
    })
}
