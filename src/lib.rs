//! # PolyMotiv
//!
//! Embedded personalization engine for student motivation apps.
//!
//! PolyMotiv owns the non-UI logic of a study-motivation widget: onboarding
//! a student through a short preference form, personalizing motivational
//! quotes and study tips from the collected preferences, and tracking
//! visit streaks — all persisted in an embedded key-value store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polymotiv::{Config, Motivator, OnboardingForm};
//!
//! // Open or create the store
//! let app = Motivator::open("./motiv.db", Config::default())?;
//!
//! // Onboard the student
//! let form = OnboardingForm::filled("engineering", "hands-on", "4");
//! app.submit_onboarding(&form)?;
//!
//! // Render the dashboard
//! let dashboard = app.dashboard_content()?;
//! println!("{} — streak {}", dashboard.greeting.greeting, dashboard.stats.motivation_streak);
//!
//! // Clean up
//! app.close()?;
//! ```
//!
//! ## Key Concepts
//!
//! ### Preferences
//!
//! The **preference record** is the singleton output of onboarding: course
//! cluster, learning style, and confidence level. Saving replaces it
//! wholesale; reading it is fail-soft (missing or malformed data means
//! "never onboarded").
//!
//! ### Personalization
//!
//! Content draws are uniform shuffle-then-take over typed catalog pools:
//! motivations come from the general pool unioned with the student's
//! cluster pool, study tips from the learning-style pool (falling back to
//! structured). Draws accept any [`rand::Rng`], so tests inject a seeded
//! source.
//!
//! ### Progress
//!
//! The **streak** counts consecutive local calendar days with a visit. The
//! rules are pure functions over an injected [`Clock`], so day transitions
//! are testable without wall-clock waits.
//!
//! ## Error Handling
//!
//! Validation failures are recoverable notices; persisted-entity reads
//! degrade to defaults instead of erroring; analytics and saved-tip writes
//! are best-effort. Only open/close and the writes that affect
//! personalization correctness (preferences, stats) propagate storage
//! errors. See [`MotivError`].
//!
//! ## Thread Safety
//!
//! [`Motivator`] is `Send + Sync` and can be shared across threads using
//! `Arc`. The store uses MVCC for concurrent reads with exclusive write
//! locking.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod app;
mod clock;
mod config;
mod error;
mod types;

pub mod storage;

// Domain modules
pub mod content;
mod events;
mod onboarding;
mod personalize;
mod preferences;
pub mod progress;
mod timer;
mod tips;

// ============================================================================
// Public API re-exports
// ============================================================================

// Main engine interface
pub use app::{DashboardContent, Motivator};

// Configuration
pub use config::Config;

// Error handling
pub use error::{MotivError, Result, StorageError, ValidationError};

// Clock
pub use clock::{Clock, FixedClock, SystemClock};

// Core types
pub use types::{Timestamp, TipId};

// Domain types
pub use content::{confidence_message, Catalog, ClusterGreeting, Motivation, MotivationCategory, StudyTip};
pub use events::{AnalyticsEvent, EventContext};
pub use onboarding::{ChoiceGroup, FlowState, OnboardingFlow, OnboardingForm, StepId};
pub use preferences::{ConfidenceLevel, CourseCluster, LearningStyle, Preferences};
pub use progress::{Achievement, ProgressStats};
pub use timer::{StudyTimer, TimerState};
pub use tips::SavedTip;

// Selection (for harnesses that inject their own RNG)
pub use personalize::{select_motivations, select_study_tips};

// Storage (for advanced users)
pub use storage::DatabaseMetadata;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common PolyMotiv usage.
///
/// ```rust
/// use polymotiv::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{DashboardContent, Motivator};
    pub use crate::config::Config;
    pub use crate::content::{Motivation, StudyTip};
    pub use crate::error::{MotivError, Result};
    pub use crate::onboarding::{OnboardingFlow, OnboardingForm, StepId};
    pub use crate::preferences::{CourseCluster, LearningStyle, Preferences};
    pub use crate::progress::ProgressStats;
    pub use crate::types::Timestamp;
}
