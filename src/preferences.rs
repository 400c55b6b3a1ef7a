//! The user preference record and its typed vocabulary.
//!
//! Preferences are the singleton output of onboarding: the student's course
//! cluster, learning style, and self-reported confidence. Both enums are
//! exhaustive — every cluster and style the catalog knows is a variant, so
//! content coverage is checkable at test time instead of at lookup time.
//!
//! Unknown raw values (which a well-behaved UI never produces) resolve to
//! the documented defaults: [`CourseCluster::Engineering`] and
//! [`LearningStyle::Structured`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Timestamp;

/// The student's declared field-of-study track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseCluster {
    /// Engineering and technology tracks. The documented fallback cluster.
    #[default]
    Engineering,
    /// Business and management tracks.
    Business,
    /// Design and creative media tracks.
    Design,
    /// Health and care tracks.
    Health,
}

impl CourseCluster {
    /// All clusters, for exhaustive catalog-coverage checks.
    pub const ALL: [CourseCluster; 4] = [
        CourseCluster::Engineering,
        CourseCluster::Business,
        CourseCluster::Design,
        CourseCluster::Health,
    ];

    /// Parses a raw form value ("engineering", "business", ...).
    ///
    /// Returns `None` for unknown values; see
    /// [`from_form_value_or_default`](Self::from_form_value_or_default)
    /// for the fallback-applying variant.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "engineering" => Some(Self::Engineering),
            "business" => Some(Self::Business),
            "design" => Some(Self::Design),
            "health" => Some(Self::Health),
            _ => None,
        }
    }

    /// Parses a raw form value, resolving unknown values to the default.
    pub fn from_form_value_or_default(value: &str) -> Self {
        Self::from_form_value(value).unwrap_or_default()
    }

    /// Returns the raw form value for this cluster.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "engineering",
            Self::Business => "business",
            Self::Design => "design",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for CourseCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The student's self-reported preferred study modality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    /// Learns through diagrams, color, and spatial layout.
    Visual,
    /// Learns by building, doing, and teaching others.
    HandsOn,
    /// Learns with peers and study groups.
    Social,
    /// Learns through schedules and routine. The documented fallback style.
    #[default]
    Structured,
}

impl LearningStyle {
    /// All styles, for exhaustive catalog-coverage checks.
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::HandsOn,
        LearningStyle::Social,
        LearningStyle::Structured,
    ];

    /// Parses a raw form value ("visual", "hands-on", ...).
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "visual" => Some(Self::Visual),
            "hands-on" => Some(Self::HandsOn),
            "social" => Some(Self::Social),
            "structured" => Some(Self::Structured),
            _ => None,
        }
    }

    /// Parses a raw form value, resolving unknown values to the default.
    pub fn from_form_value_or_default(value: &str) -> Self {
        Self::from_form_value(value).unwrap_or_default()
    }

    /// Returns the raw form value for this style.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::HandsOn => "hands-on",
            Self::Social => "social",
            Self::Structured => "structured",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported confidence on the 1–5 scale.
///
/// Stored validated; out-of-range input never reaches the record. Message
/// lookup for arbitrary input goes through
/// [`Catalog::confidence_message`](crate::content::Catalog::confidence_message),
/// which falls back to the level-3 message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    /// Minimum level on the scale.
    pub const MIN: u8 = 1;

    /// Maximum level on the scale.
    pub const MAX: u8 = 5;

    /// Creates a level from any integer, if it is within 1..=5.
    pub fn new(level: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Some(Self(level as u8))
        } else {
            None
        }
    }

    /// Creates a level from any integer, resolving out-of-range input to
    /// the balanced middle of the scale.
    pub fn new_or_default(level: i64) -> Self {
        Self::new(level).unwrap_or_default()
    }

    /// Returns the level as an integer in 1..=5.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for ConfidenceLevel {
    /// The balanced middle of the scale, also the lookup fallback.
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The singleton user preference record.
///
/// Created by a successful onboarding submission, replaced wholesale on
/// every save (no merge), read on every dashboard render. At most one
/// record exists at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Declared field-of-study track.
    pub course_cluster: CourseCluster,

    /// Preferred study modality.
    pub learning_style: LearningStyle,

    /// Self-reported confidence (1–5).
    pub confidence_level: ConfidenceLevel,

    /// When this record was created (epoch milliseconds).
    pub timestamp: Timestamp,
}
