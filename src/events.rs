//! Analytics event log types.
//!
//! The event log is append-only, bounded, and purely observational: nothing
//! in the crate reads it back except the inspection accessor. Writes are
//! best-effort — a failed append must never interrupt the flow that
//! produced it, so the facade swallows storage errors here and logs them
//! at WARN.
//!
//! Events are persisted as JSON rows so the log stays greppable with
//! ordinary tools.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A single recorded interaction event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name, e.g. `"onboarding_completed"`.
    pub name: String,

    /// When the event occurred (epoch milliseconds).
    pub timestamp: Timestamp,

    /// Free-form event payload.
    pub data: BTreeMap<String, serde_json::Value>,

    /// Contextual metadata captured at record time.
    pub context: EventContext,
}

impl AnalyticsEvent {
    /// Creates an event stamped with the given instant and the current
    /// crate/platform context.
    pub fn new(
        name: impl Into<String>,
        data: BTreeMap<String, serde_json::Value>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            name: name.into(),
            timestamp,
            data,
            context: EventContext::current(),
        }
    }
}

/// Contextual metadata attached to every event.
///
/// The core-side analogue of the user-agent and page URL a browser
/// implementation would capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// Version of this crate at record time.
    pub app_version: String,

    /// Host operating system.
    pub platform: String,
}

impl EventContext {
    /// Captures the current context.
    pub fn current() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_json_roundtrip() {
        let mut data = BTreeMap::new();
        data.insert("course_cluster".to_string(), json!("design"));
        data.insert("confidence_level".to_string(), json!(4));

        let event = AnalyticsEvent::new("onboarding_completed", data, Timestamp::from_millis(1000));

        let bytes = serde_json::to_vec(&event).unwrap();
        let restored: AnalyticsEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, restored);
    }

    #[test]
    fn test_event_without_payload() {
        let event = AnalyticsEvent::new("timer_started", BTreeMap::new(), Timestamp::from_millis(5));
        assert_eq!(event.name, "timer_started");
        assert!(event.data.is_empty());
    }

    #[test]
    fn test_context_captures_crate_version() {
        let ctx = EventContext::current();
        assert_eq!(ctx.app_version, env!("CARGO_PKG_VERSION"));
        assert!(!ctx.platform.is_empty());
    }
}
