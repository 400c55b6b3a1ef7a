//! Storage layer abstractions for PolyMotiv.
//!
//! This module provides a trait-based abstraction over the storage engine,
//! allowing different backends to be used (e.g., redb, mock for testing).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Motivator                               │
//! │                         │                                    │
//! │                         ▼                                    │
//! │              ┌─────────────────────┐                        │
//! │              │   StorageEngine     │  ← Trait               │
//! │              └─────────────────────┘                        │
//! │                    ▲         ▲                              │
//! │                    │         │                              │
//! │         ┌─────────┴─┐   ┌───┴─────────┐                    │
//! │         │RedbStorage│   │ MockStorage │                    │
//! │         └───────────┘   └─────────────┘                    │
//! │           (prod)           (test)                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Degradation Policy
//!
//! Reads are fail-soft at the row level: a malformed singleton row
//! deserializes to "absent" and a malformed collection row is skipped,
//! both logged at WARN. Transaction-level failures still surface as
//! errors; the facade degrades those to entity defaults so no read path
//! ever reaches the UI as an error.

pub mod redb;
pub mod schema;

pub use self::redb::RedbStorage;
pub use schema::{DatabaseMetadata, SCHEMA_VERSION};

use std::path::Path;

use crate::error::Result;
use crate::events::AnalyticsEvent;
use crate::preferences::Preferences;
use crate::progress::ProgressStats;
use crate::tips::SavedTip;
use crate::types::TipId;

/// Storage engine trait for PolyMotiv.
///
/// This trait defines the contract that any storage backend must implement.
/// The primary implementation is [`RedbStorage`], but other implementations
/// can be created for testing or alternative backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow the facade to be shared
/// across threads. The engine handles internal synchronization; every
/// read-modify-write (event append, tip id nudging) runs inside a single
/// write transaction so no other logical step can interleave.
pub trait StorageEngine: Send + Sync {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Returns the database metadata.
    fn metadata(&self) -> &DatabaseMetadata;

    /// Closes the storage engine, flushing any pending writes.
    ///
    /// This method consumes the storage engine. After calling `close()`,
    /// the engine cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend supports reporting flush failures.
    /// Note: the current redb backend flushes on drop (infallible), so
    /// this always returns `Ok(())` for [`RedbStorage`].
    fn close(self: Box<Self>) -> Result<()>;

    /// Returns the path to the database file, if applicable.
    fn path(&self) -> Option<&Path>;

    // =========================================================================
    // Preferences (singleton)
    // =========================================================================

    /// Persists the preference record, replacing any prior value wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or serialization fails. Callers
    /// surface this — a lost preference write affects personalization
    /// correctness.
    fn save_preferences(&self, preferences: &Preferences) -> Result<()>;

    /// Loads the preference record.
    ///
    /// Returns `Ok(None)` if no record exists **or the stored row is
    /// malformed** — absence and corruption are indistinguishable to
    /// callers, both meaning "never onboarded".
    fn load_preferences(&self) -> Result<Option<Preferences>>;

    /// Deletes the preference record.
    ///
    /// Returns `true` if a record existed.
    fn delete_preferences(&self) -> Result<bool>;

    // =========================================================================
    // Progress stats (singleton)
    // =========================================================================

    /// Persists the stats record, replacing any prior value.
    fn save_stats(&self, stats: &ProgressStats) -> Result<()>;

    /// Loads the stats record.
    ///
    /// Returns `Ok(None)` for a missing or malformed row, which callers
    /// treat as first-time initialization.
    fn load_stats(&self) -> Result<Option<ProgressStats>>;

    // =========================================================================
    // Saved tips (append-only)
    // =========================================================================

    /// Appends a saved tip.
    ///
    /// If the tip's instant-derived id collides with an existing row, the
    /// id is nudged forward one millisecond until free; the stored (and
    /// returned) id is the final one.
    fn append_saved_tip(&self, tip: &SavedTip) -> Result<TipId>;

    /// Lists saved tips in save order.
    ///
    /// Malformed rows are skipped, not surfaced.
    fn list_saved_tips(&self) -> Result<Vec<SavedTip>>;

    // =========================================================================
    // Analytics events (bounded FIFO)
    // =========================================================================

    /// Appends an event, then trims the log to the most recent `capacity`
    /// entries (oldest evicted first) within the same transaction.
    fn append_event(&self, event: &AnalyticsEvent, capacity: usize) -> Result<()>;

    /// Lists events in append order.
    ///
    /// Malformed rows are skipped, not surfaced.
    fn list_events(&self) -> Result<Vec<AnalyticsEvent>>;
}

/// Opens a storage engine at the given path.
///
/// This is a convenience function that creates a [`RedbStorage`] instance.
/// For more control, use `RedbStorage::open()` directly.
///
/// # Errors
///
/// Returns an error if:
/// - The database file is corrupted
/// - The database is locked by another process
/// - Schema version doesn't match
pub fn open_storage(path: impl AsRef<Path>) -> Result<Box<dyn StorageEngine>> {
    let storage = RedbStorage::open(path)?;
    Ok(Box::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_storage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let storage = open_storage(&path).unwrap();

        assert_eq!(storage.metadata().schema_version, SCHEMA_VERSION);
        assert!(storage.path().is_some());

        storage.close().unwrap();
    }

    #[test]
    fn test_storage_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RedbStorage>();
    }
}
