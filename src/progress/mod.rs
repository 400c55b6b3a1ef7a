//! Progress tracking: days active, visit streaks, and achievements.
//!
//! The streak rules operate on **calendar days in local time**, never on
//! instant subtraction — a visit at 23:59 followed by one at 00:01 is a
//! one-day gap, and month/year boundaries follow the calendar:
//!
//! - gap of exactly one day → streak increments by 1
//! - gap of more than one day → streak resets to 1
//! - same-day revisit → record unchanged (idempotent within a day)
//!
//! [`advance`] is a pure function over an explicit "today" so every rule is
//! testable without storage or wall-clock waits; the facade supplies the
//! clock and wraps the call in a load-modify-save transaction.

pub mod types;

pub use types::{Achievement, ProgressStats};

use chrono::NaiveDate;

/// Streak achievements in ascending threshold order.
///
/// Lookup picks the largest satisfied threshold, so ordering matters.
pub const ACHIEVEMENTS: [Achievement; 5] = [
    Achievement {
        threshold: 1,
        title: "Welcome Badge",
        badge: "🏅",
    },
    Achievement {
        threshold: 3,
        title: "3-Day Streak Champion",
        badge: "🔥",
    },
    Achievement {
        threshold: 7,
        title: "Week Warrior",
        badge: "⭐",
    },
    Achievement {
        threshold: 14,
        title: "Two-Week Legend",
        badge: "💎",
    },
    Achievement {
        threshold: 30,
        title: "Monthly Master",
        badge: "🏆",
    },
];

/// Returns the highest achievement whose threshold the streak satisfies.
///
/// Streaks below the first threshold (including 0) still earn the welcome
/// badge — everyone who shows up gets one.
pub fn achievement_for_streak(streak: u32) -> &'static Achievement {
    let mut latest = &ACHIEVEMENTS[0];
    for achievement in &ACHIEVEMENTS {
        if streak >= achievement.threshold {
            latest = achievement;
        }
    }
    latest
}

/// Advances a progress record to `today`.
///
/// `None` (no record yet, or an unreadable one) initializes a first-visit
/// record. Otherwise `days_active` is recomputed as
/// `max(days_since_start + 1, previous)` and the streak rules above apply.
/// A negative gap (the clock moved backwards) leaves the record untouched.
pub fn advance(stats: Option<ProgressStats>, today: NaiveDate) -> ProgressStats {
    let Some(mut stats) = stats else {
        return ProgressStats::first_visit(today);
    };

    let days_since_start = (today - stats.start_date).num_days();
    if days_since_start >= 0 {
        let elapsed = (days_since_start + 1).min(u32::MAX as i64) as u32;
        stats.days_active = stats.days_active.max(elapsed);
    }

    let gap = (today - stats.last_visit).num_days();
    if gap == 1 {
        stats.motivation_streak += 1;
        stats.last_visit = today;
    } else if gap > 1 {
        stats.motivation_streak = 1;
        stats.last_visit = today;
    }
    // gap == 0: same-day revisit, unchanged; gap < 0: clock anomaly, unchanged

    stats
}
