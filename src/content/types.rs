//! Type definitions for catalog content items.
//!
//! Content items are immutable: the catalog is assembled once and only read
//! afterwards. `Clone` is cheap enough here that selection hands out owned
//! copies rather than threading catalog lifetimes through the facade.

use serde::{Deserialize, Serialize};

use crate::preferences::CourseCluster;

/// A motivational quote with its supporting context line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivation {
    /// The quote shown prominently.
    pub quote: String,

    /// The supporting context shown under the quote.
    pub context: String,
}

impl Motivation {
    /// Creates a motivation item.
    pub fn new(quote: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            context: context.into(),
        }
    }
}

/// A study tip with a short title and a how-to description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyTip {
    /// Short imperative title.
    pub title: String,

    /// How to apply the tip.
    pub description: String,
}

impl StudyTip {
    /// Creates a study tip.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Per-cluster dashboard greeting pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterGreeting {
    /// The headline greeting.
    pub greeting: String,

    /// The message shown under the greeting.
    pub message: String,
}

impl ClusterGreeting {
    /// Creates a greeting pair.
    pub fn new(greeting: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            message: message.into(),
        }
    }
}

/// Which motivation table a lookup addresses.
///
/// The general category always exists; cluster categories may be absent in
/// custom catalogs, in which case lookups yield an empty slice and callers
/// draw from general alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotivationCategory {
    /// The shared category every student draws from.
    General,
    /// A cluster-specific category unioned with general.
    Cluster(CourseCluster),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motivation_constructor() {
        let item = Motivation::new("quote", "context");
        assert_eq!(item.quote, "quote");
        assert_eq!(item.context, "context");
    }

    #[test]
    fn test_study_tip_serialization_roundtrip() {
        let tip = StudyTip::new("Color-Code Your Notes", "Use different colors.");
        let bytes = bincode::serialize(&tip).unwrap();
        let restored: StudyTip = bincode::deserialize(&bytes).unwrap();
        assert_eq!(tip, restored);
    }

    #[test]
    fn test_category_equality() {
        assert_eq!(
            MotivationCategory::Cluster(CourseCluster::Design),
            MotivationCategory::Cluster(CourseCluster::Design)
        );
        assert_ne!(
            MotivationCategory::General,
            MotivationCategory::Cluster(CourseCluster::Engineering)
        );
    }
}
