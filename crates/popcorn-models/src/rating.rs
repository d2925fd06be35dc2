use serde::{Deserialize, Serialize};

/// Pending rating in the detail pane before it is committed to the watched list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingDraft {
    rating: Option<u8>,
    revisions: u32,
}

impl RatingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// How many times the chosen rating changed before commit.
    /// Analytics only, nothing is gated on it.
    pub fn revisions(&self) -> u32 {
        self.revisions
    }

    /// Record a choice from the rating input. Re-choosing the current value is not a revision.
    pub fn choose(&mut self, rating: u8) {
        if self.rating != Some(rating) {
            self.rating = Some(rating);
            self.revisions += 1;
        }
    }
}
