use crate::watched::WatchedEntry;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over the watched list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_imdb_rating: mean(entries.iter().map(|e| e.imdb_rating)),
            avg_user_rating: mean(entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime: mean(entries.iter().map(|e| f64::from(e.runtime_minutes))),
        }
    }
}

/// Arithmetic mean rounded to one decimal place; empty input is 0.0.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    round_one_decimal(sum / count as f64)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
