//! Clock abstraction for calendar-day and instant queries.
//!
//! Progress tracking compares dates at calendar-day granularity in local
//! time. Routing every "what day is it" question through a trait keeps the
//! streak arithmetic testable without real wall-clock waits: production code
//! uses [`SystemClock`], tests drive a [`FixedClock`] forward day by day.

use std::sync::Mutex;

use chrono::{Local, NaiveDate, NaiveTime};

use crate::types::Timestamp;

/// Source of the current instant and the current local calendar day.
///
/// Implementations must be `Send + Sync`; the facade shares the clock
/// across all operations.
pub trait Clock: Send + Sync {
    /// Returns the current instant in epoch milliseconds.
    fn now(&self) -> Timestamp;

    /// Returns the current calendar day in local time.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation used in production.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually-advanced clock for tests and deterministic replay.
///
/// Share it via `Arc` to keep a handle after handing it to the facade:
///
/// ```rust
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use polymotiv::FixedClock;
///
/// let clock = Arc::new(FixedClock::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
/// ));
/// let handle = Arc::clone(&clock);
/// // ... move `clock` into the facade ...
/// handle.advance_days(1);
/// ```
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a fixed clock pinned to the given calendar day.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Pins the clock to a specific calendar day.
    pub fn set_today(&self, date: NaiveDate) {
        *self.today.lock().unwrap_or_else(|e| e.into_inner()) = date;
    }

    /// Moves the clock forward (or backward, if negative) by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut today = self.today.lock().unwrap_or_else(|e| e.into_inner());
        *today += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        // Midnight of the pinned day, so instants stay consistent with dates
        let today = *self.today.lock().unwrap_or_else(|e| e.into_inner());
        Timestamp::from_millis(today.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
    }

    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_system_clock_today_matches_local() {
        let clock = SystemClock;
        assert_eq!(clock.today(), Local::now().date_naive());
    }

    #[test]
    fn test_fixed_clock_reports_pinned_day() {
        let clock = FixedClock::new(day(2024, 3, 1));
        assert_eq!(clock.today(), day(2024, 3, 1));
    }

    #[test]
    fn test_fixed_clock_advance_days() {
        let clock = FixedClock::new(day(2024, 2, 28));
        clock.advance_days(2);
        // 2024 is a leap year
        assert_eq!(clock.today(), day(2024, 3, 1));
    }

    #[test]
    fn test_fixed_clock_advance_across_year_boundary() {
        let clock = FixedClock::new(day(2023, 12, 31));
        clock.advance_days(1);
        assert_eq!(clock.today(), day(2024, 1, 1));
    }

    #[test]
    fn test_fixed_clock_now_tracks_day() {
        let clock = FixedClock::new(day(2024, 3, 1));
        let before = clock.now();
        clock.advance_days(1);
        let after = clock.now();
        assert!(after > before);
    }

    #[test]
    fn test_clock_trait_object_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemClock>();
        assert_send_sync::<FixedClock>();

        let _boxed: Box<dyn Clock> = Box::new(SystemClock);
    }
}
