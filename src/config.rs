//! Configuration types for PolyMotiv.
//!
//! The [`Config`] struct controls engine behavior:
//! - Analytics event log capacity (FIFO eviction bound)
//! - Study timer duration
//! - The cosmetic dashboard reveal delay the host UI should apply
//!
//! # Example
//! ```rust
//! use polymotiv::Config;
//!
//! // Use defaults (100-event log, 25-minute timer)
//! let config = Config::default();
//!
//! // Customize for a shorter demo timer
//! let config = Config {
//!     timer_duration_secs: 5 * 60,
//!     ..Default::default()
//! };
//! ```

use crate::error::MotivError;

/// Engine configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings:
///
/// ```rust
/// use polymotiv::Config;
///
/// let config = Config {
///     event_log_capacity: 500,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of analytics events retained in the log.
    ///
    /// Appending beyond this bound evicts the oldest events (FIFO).
    /// Default: 100
    pub event_log_capacity: usize,

    /// Study timer duration in seconds.
    ///
    /// Default: 1500 (25 minutes, one focus block).
    pub timer_duration_secs: u32,

    /// Delay in milliseconds the host UI should wait before revealing the
    /// dashboard after onboarding completes.
    ///
    /// Purely cosmetic; the core never sleeps. Carried here so the host and
    /// core agree on one value. Default: 1500
    pub reveal_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Matches the original log bound; keeps the store compact
            event_log_capacity: 100,
            // One classic focus block
            timer_duration_secs: 25 * 60,
            reveal_delay_ms: 1500,
        }
    }
}

impl Config {
    /// Creates a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// Called automatically by `Motivator::open()`. You can also call this
    /// explicitly to check configuration before attempting to open.
    ///
    /// # Errors
    /// Returns `MotivError::Config` if:
    /// - `event_log_capacity` is 0
    /// - `timer_duration_secs` is 0
    pub fn validate(&self) -> Result<(), MotivError> {
        if self.event_log_capacity == 0 {
            return Err(MotivError::config("event_log_capacity must be greater than 0"));
        }

        if self.timer_duration_secs == 0 {
            return Err(MotivError::config("timer_duration_secs must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.event_log_capacity, 100);
        assert_eq!(config.timer_duration_secs, 1500);
        assert_eq!(config.reveal_delay_ms, 1500);
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_capacity_zero() {
        let config = Config {
            event_log_capacity: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MotivError::Config { .. }));
    }

    #[test]
    fn test_validate_timer_duration_zero() {
        let config = Config {
            timer_duration_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_capacity_valid() {
        let config = Config {
            event_log_capacity: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
