//! Saved study tips.
//!
//! Saving a tip bookmarks the currently-shown study tip into an unbounded,
//! insertion-ordered collection. There is no deduplication — saving the
//! same tip twice stores it twice, each with its own id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::StudyTip;
use crate::types::{Timestamp, TipId};

/// A bookmarked study tip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTip {
    /// Unique id derived from the save instant.
    pub id: TipId,

    /// Tip title at save time.
    pub title: String,

    /// Tip description at save time.
    pub description: String,

    /// Display-formatted save date (`YYYY-MM-DD`).
    pub saved_at: String,
}

impl SavedTip {
    /// Snapshots a study tip at the given instant.
    pub fn from_tip(tip: &StudyTip, now: Timestamp, today: NaiveDate) -> Self {
        Self {
            id: TipId::from_timestamp(now),
            title: tip.title.clone(),
            description: tip.description.clone(),
            saved_at: today.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_tip_snapshots_content() {
        let tip = StudyTip::new("Mind Map Magic", "Create visual mind maps.");
        let saved = SavedTip::from_tip(&tip, Timestamp::from_millis(1700000000000), day(2024, 3, 1));

        assert_eq!(saved.id, TipId::from_millis(1700000000000));
        assert_eq!(saved.title, "Mind Map Magic");
        assert_eq!(saved.description, "Create visual mind maps.");
        assert_eq!(saved.saved_at, "2024-03-01");
    }

    #[test]
    fn test_saved_tip_serialization_roundtrip() {
        let tip = StudyTip::new("t", "d");
        let saved = SavedTip::from_tip(&tip, Timestamp::from_millis(42), day(2024, 1, 2));
        let bytes = bincode::serialize(&saved).unwrap();
        let restored: SavedTip = bincode::deserialize(&bytes).unwrap();
        assert_eq!(saved, restored);
    }
}
