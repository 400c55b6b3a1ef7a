//! PolyMotiv main struct and lifecycle operations.
//!
//! The [`Motivator`] struct is the primary interface for embedding the
//! engine. It provides methods for:
//!
//! - Opening and closing the persistent store
//! - Submitting onboarding and managing the preference record
//! - Querying personalized dashboard content
//! - Refreshing the progress stats transaction
//! - Best-effort analytics and saved-tip bookkeeping
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use polymotiv::{Config, Motivator, OnboardingForm};
//!
//! // Open or create the store
//! let app = Motivator::open("./motiv.db", Config::default())?;
//!
//! // Run onboarding
//! let form = OnboardingForm::filled("engineering", "visual", "4");
//! let preferences = app.submit_onboarding(&form)?;
//!
//! // Render the dashboard
//! let dashboard = app.dashboard_content()?;
//! println!("{}", dashboard.motivation.quote);
//!
//! // Close when done
//! app.close()?;
//! ```
//!
//! # Thread Safety
//!
//! `Motivator` is `Send + Sync` and can be shared across threads using
//! `Arc`. The preference cache uses an internal lock, and every
//! read-modify-write runs inside a single storage transaction.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::content::{Catalog, ClusterGreeting, Motivation, StudyTip};
use crate::error::{MotivError, Result};
use crate::events::AnalyticsEvent;
use crate::onboarding::{OnboardingFlow, OnboardingForm};
use crate::personalize;
use crate::preferences::Preferences;
use crate::progress::{self, Achievement, ProgressStats};
use crate::storage::{open_storage, DatabaseMetadata, StorageEngine};
use crate::timer::StudyTimer;
use crate::tips::SavedTip;

/// Everything the dashboard renders in one query.
#[derive(Clone, Debug)]
pub struct DashboardContent {
    /// Cluster-personalized greeting pair.
    pub greeting: ClusterGreeting,

    /// Today's drawn motivation.
    pub motivation: Motivation,

    /// Today's drawn study tip.
    pub study_tip: StudyTip,

    /// Refreshed progress stats (this query runs the stats transaction).
    pub stats: ProgressStats,

    /// Highest achievement the current streak satisfies.
    pub achievement: &'static Achievement,
}

/// The main PolyMotiv engine handle.
///
/// Create an instance with [`Motivator::open()`] and close it with
/// [`Motivator::close()`].
///
/// # Ownership
///
/// `Motivator` owns its storage. When you call `close()`, the engine is
/// consumed and cannot be used afterward. This ensures resources are
/// properly released.
pub struct Motivator {
    /// Storage engine (redb or mock for testing).
    storage: Box<dyn StorageEngine>,

    /// Read-only content tables.
    catalog: Catalog,

    /// Source of instants and local calendar days.
    clock: Arc<dyn Clock>,

    /// Configuration used to open this engine.
    config: Config,

    /// In-memory preference cache; filled on first successful load.
    preferences: RwLock<Option<Preferences>>,
}

impl std::fmt::Debug for Motivator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Motivator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Motivator {
    /// Opens or creates the engine store at the specified path.
    ///
    /// Uses the system wall clock; tests that need to control "today"
    /// should use [`open_with_clock`](Self::open_with_clock).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is invalid (see [`Config::validate`])
    /// - The store file is corrupted or locked by another process
    /// - Schema version doesn't match
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        Self::open_with_clock(path, config, Arc::new(SystemClock))
    }

    /// Opens the engine with an injected clock.
    ///
    /// The streak rules depend on "today"; a [`FixedClock`](crate::FixedClock)
    /// makes multi-day scenarios testable without waiting for midnight.
    #[instrument(skip(config, clock), fields(path = %path.as_ref().display()))]
    pub fn open_with_clock(
        path: impl AsRef<Path>,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        // Validate configuration first
        config.validate()?;

        info!("Opening PolyMotiv engine");

        let storage = open_storage(&path)?;

        info!(
            event_log_capacity = config.event_log_capacity,
            "Engine opened successfully"
        );

        Ok(Self {
            storage,
            catalog: Catalog::builtin(),
            clock,
            config,
            preferences: RwLock::new(None),
        })
    }

    /// Closes the engine, flushing all pending writes.
    ///
    /// This method consumes the `Motivator` instance, ensuring it cannot
    /// be used after closing.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend reports a flush failure.
    #[instrument(skip(self))]
    pub fn close(self) -> Result<()> {
        info!("Closing PolyMotiv engine");
        self.storage.close()?;
        Ok(())
    }

    /// Returns a reference to the engine configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the store metadata.
    #[inline]
    pub fn metadata(&self) -> &DatabaseMetadata {
        self.storage.metadata()
    }

    /// Returns a reference to the content catalog.
    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // =========================================================================
    // Onboarding & preferences
    // =========================================================================

    /// Validates the full onboarding form and persists the preferences.
    ///
    /// Steps are validated in order, so the returned error names the first
    /// offending field or group; nothing is persisted on failure. On
    /// success the record replaces any prior preferences wholesale, the
    /// cache is updated, and an `onboarding_completed` event is recorded
    /// best-effort.
    #[instrument(skip(self, form))]
    pub fn submit_onboarding(&self, form: &OnboardingForm) -> Result<Preferences> {
        let mut flow = OnboardingFlow::new();
        let preferences = flow.submit(form, self.clock.now())?;

        // A lost preference write affects personalization correctness, so
        // unlike analytics this error propagates.
        self.storage.save_preferences(&preferences)?;
        *self.write_cache() = Some(preferences.clone());

        let mut data = BTreeMap::new();
        data.insert(
            "course_cluster".to_string(),
            json!(preferences.course_cluster.as_str()),
        );
        data.insert(
            "learning_style".to_string(),
            json!(preferences.learning_style.as_str()),
        );
        data.insert(
            "confidence_level".to_string(),
            json!(preferences.confidence_level.value()),
        );
        self.record_event("onboarding_completed", data);

        Ok(preferences)
    }

    /// Returns the preference record, if the student has onboarded.
    ///
    /// The cached value is returned when present; otherwise the store is
    /// read fail-soft (missing or malformed data means "never onboarded")
    /// and the cache is filled on success.
    pub fn preferences(&self) -> Option<Preferences> {
        if let Some(preferences) = self.read_cache().as_ref() {
            return Some(preferences.clone());
        }

        let loaded = load_or_default("preferences", self.storage.load_preferences());
        if let Some(ref preferences) = loaded {
            *self.write_cache() = Some(preferences.clone());
        }
        loaded
    }

    /// Returns true once onboarding has completed and preferences exist.
    pub fn is_onboarded(&self) -> bool {
        self.preferences().is_some()
    }

    /// Deletes the preference record, forcing onboarding re-entry.
    ///
    /// Returns `true` if a record existed.
    pub fn clear_preferences(&self) -> Result<bool> {
        let existed = self.storage.delete_preferences()?;
        *self.write_cache() = None;
        Ok(existed)
    }

    // =========================================================================
    // Dashboard queries
    // =========================================================================

    /// Assembles everything one dashboard render needs.
    ///
    /// Runs the stats transaction as a side effect, so each render counts
    /// as a visit for streak purposes. Works without preferences by
    /// falling back to the default cluster and style.
    pub fn dashboard_content(&self) -> Result<DashboardContent> {
        let preferences = self.preferences();
        let cluster = preferences
            .as_ref()
            .map(|p| p.course_cluster)
            .unwrap_or_default();

        let motivation = self.draw_motivation(preferences.as_ref())?;
        let study_tip = self.draw_study_tip(preferences.as_ref())?;
        let stats = self.stats()?;
        let achievement = progress::achievement_for_streak(stats.motivation_streak);

        Ok(DashboardContent {
            greeting: self.catalog.greeting(cluster).clone(),
            motivation,
            study_tip,
            stats,
            achievement,
        })
    }

    /// Draws a fresh motivation and records the refresh.
    pub fn refresh_motivation(&self) -> Result<Motivation> {
        let preferences = self.preferences();
        let motivation = self.draw_motivation(preferences.as_ref())?;
        self.record_event("motivation_refreshed", BTreeMap::new());
        Ok(motivation)
    }

    /// Draws a fresh study tip and records the refresh.
    pub fn refresh_study_tip(&self) -> Result<StudyTip> {
        let preferences = self.preferences();
        let study_tip = self.draw_study_tip(preferences.as_ref())?;
        self.record_event("study_tip_refreshed", BTreeMap::new());
        Ok(study_tip)
    }

    /// Returns the confidence message for a raw level (fallback: level 3).
    pub fn confidence_message(&self, level: i64) -> &'static str {
        self.catalog.confidence_message(level)
    }

    fn draw_motivation(&self, preferences: Option<&Preferences>) -> Result<Motivation> {
        let mut rng = rand::rng();
        personalize::select_motivations(&self.catalog, preferences, 1, &mut rng)
            .into_iter()
            .next()
            .ok_or_else(|| MotivError::lookup("motivation pool is empty"))
    }

    fn draw_study_tip(&self, preferences: Option<&Preferences>) -> Result<StudyTip> {
        let mut rng = rand::rng();
        personalize::select_study_tips(&self.catalog, preferences, 1, &mut rng)
            .into_iter()
            .next()
            .ok_or_else(|| MotivError::lookup("study tip pool is empty"))
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Runs the stats load-modify-save transaction and returns the
    /// refreshed record.
    ///
    /// Deliberately **not** idempotent across calendar days — a later-day
    /// call advances or resets the streak — but same-day calls leave the
    /// record unchanged. A missing or unreadable record initializes
    /// first-visit defaults.
    pub fn stats(&self) -> Result<ProgressStats> {
        let current = load_or_default("stats", self.storage.load_stats());
        let refreshed = progress::advance(current, self.clock.today());
        self.storage.save_stats(&refreshed)?;
        Ok(refreshed)
    }

    /// Returns the highest achievement the streak satisfies.
    pub fn achievement_for_streak(&self, streak: u32) -> &'static Achievement {
        progress::achievement_for_streak(streak)
    }

    // =========================================================================
    // Study timer
    // =========================================================================

    /// Creates a study timer configured with this engine's duration.
    ///
    /// The timer is a detached value object; the host drives it with
    /// one-second ticks and records `timer_started` when it starts one.
    pub fn study_timer(&self) -> StudyTimer {
        StudyTimer::new(self.config.timer_duration_secs)
    }

    // =========================================================================
    // Saved tips
    // =========================================================================

    /// Bookmarks a study tip, best-effort.
    ///
    /// The returned snapshot carries the final (possibly nudged) id when
    /// the write succeeded; a failed write is logged and swallowed — the
    /// student still sees "saved".
    pub fn save_tip(&self, tip: &StudyTip) -> SavedTip {
        let mut saved = SavedTip::from_tip(tip, self.clock.now(), self.clock.today());
        match self.storage.append_saved_tip(&saved) {
            Ok(id) => saved.id = id,
            Err(err) => warn!(%err, "Failed to persist saved tip"),
        }
        self.record_event("tip_saved", BTreeMap::new());
        saved
    }

    /// Lists saved tips in save order; degrades to empty on read failure.
    pub fn saved_tips(&self) -> Vec<SavedTip> {
        load_or_default("saved_tips", self.storage.list_saved_tips())
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Records an interaction event, best-effort.
    ///
    /// The log keeps the most recent [`Config::event_log_capacity`] events
    /// (oldest evicted first). Persistence failures are logged and
    /// swallowed — analytics must never interrupt the primary flow.
    pub fn record_event(&self, name: &str, data: BTreeMap<String, serde_json::Value>) {
        let event = AnalyticsEvent::new(name, data, self.clock.now());
        if let Err(err) = self
            .storage
            .append_event(&event, self.config.event_log_capacity)
        {
            warn!(%err, event = name, "Failed to persist analytics event");
        }
    }

    /// Lists recorded events in append order, for inspection only.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        load_or_default("events", self.storage.list_events())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, Option<Preferences>> {
        self.preferences.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, Option<Preferences>> {
        self.preferences.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// The single load-or-default accessor every persisted-entity read funnels
/// through: failures degrade to the entity default and are logged, never
/// surfaced.
fn load_or_default<T: Default>(entity: &'static str, result: Result<T>) -> T {
    result.unwrap_or_else(|err| {
        warn!(entity, %err, "Read failed; degrading to default");
        T::default()
    })
}
