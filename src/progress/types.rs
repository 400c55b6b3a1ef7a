//! Type definitions for progress tracking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The singleton progress record.
///
/// Lazily created on first stats read, mutated on every read after that,
/// persisted synchronously after each mutation. Dates are local calendar
/// days; all comparisons happen at day granularity, never on instants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    /// Calendar day of first use.
    pub start_date: NaiveDate,

    /// Days since first use, inclusive. Monotonically non-decreasing.
    pub days_active: u32,

    /// Display-only counter of tips viewed.
    pub tips_viewed: u32,

    /// Consecutive calendar days with at least one recorded visit.
    pub motivation_streak: u32,

    /// Calendar day of the last recorded visit.
    pub last_visit: NaiveDate,
}

impl ProgressStats {
    /// Creates the record for a first-ever visit on `today`.
    pub fn first_visit(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            days_active: 1,
            tips_viewed: 0,
            motivation_streak: 1,
            last_visit: today,
        }
    }
}

/// A streak achievement: the badge unlocked at a given streak threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Achievement {
    /// Minimum streak length that unlocks this achievement.
    pub threshold: u32,

    /// Human-readable title.
    pub title: &'static str,

    /// Emoji badge shown next to the title.
    pub badge: &'static str,
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.badge, self.title)
    }
}
