//! redb storage engine implementation.
//!
//! This module provides the primary storage backend for PolyMotiv using
//! [redb](https://docs.rs/redb), a pure Rust embedded key-value store.
//!
//! # Features
//!
//! - ACID transactions with MVCC
//! - Single-writer, multiple-reader concurrency
//! - Automatic crash recovery
//! - Zero external dependencies (pure Rust)
//!
//! # File Layout
//!
//! When you open a database at `./motiv.db`, redb creates:
//! - `./motiv.db` - Main database file
//! - `./motiv.db.lock` - Lock file for writer coordination (may not be visible)

use std::path::{Path, PathBuf};

use ::redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition, TableError};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::schema::{
    DatabaseMetadata, EVENTS_TABLE, METADATA_TABLE, PREFERENCES_TABLE, SAVED_TIPS_TABLE,
    SCHEMA_VERSION, SINGLETON_KEY, STATS_TABLE,
};
use super::StorageEngine;
use crate::error::{MotivError, Result, StorageError};
use crate::events::AnalyticsEvent;
use crate::preferences::Preferences;
use crate::progress::ProgressStats;
use crate::tips::SavedTip;
use crate::types::TipId;

/// Metadata key in the metadata table.
const METADATA_KEY: &str = "db_metadata";

/// redb storage engine wrapper.
///
/// This struct holds the redb database handle and cached metadata.
/// It implements [`StorageEngine`] for use with the facade.
///
/// # Thread Safety
///
/// `RedbStorage` is `Send + Sync`. redb handles internal synchronization
/// using MVCC for readers and exclusive locking for writers.
#[derive(Debug)]
pub struct RedbStorage {
    /// The redb database handle.
    db: Database,

    /// Cached database metadata.
    metadata: DatabaseMetadata,

    /// Path to the database file.
    path: PathBuf,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// If the database doesn't exist, it will be created and initialized.
    /// If it exists, the stored metadata is validated against the current
    /// schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file is corrupted
    /// - The database is locked by another process
    /// - Schema version doesn't match
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use polymotiv::storage::RedbStorage;
    ///
    /// let storage = RedbStorage::open("./motiv.db")?;
    /// ```
    #[instrument(fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db_exists = path.exists();

        debug!(db_exists = db_exists, "Opening storage engine");

        let db = Self::create_database(path)?;

        if db_exists {
            Self::open_existing(db, path.to_path_buf())
        } else {
            Self::initialize_new(db, path.to_path_buf())
        }
    }

    /// Creates the redb database handle.
    fn create_database(path: &Path) -> Result<Database> {
        let builder = Database::builder();

        // Note: redb doesn't expose a typed error variant for lock conflicts,
        // so we detect them via error message string matching. This may need
        // updating if redb changes its error messages in a future version.
        let db = builder.create(path).map_err(|e| {
            if e.to_string().contains("locked") {
                StorageError::DatabaseLocked
            } else {
                StorageError::Redb(e.to_string())
            }
        })?;

        debug!("Database file opened successfully");
        Ok(db)
    }

    /// Initializes a new database with tables and metadata.
    #[instrument(skip(db), fields(path = %path.display()))]
    fn initialize_new(db: Database, path: PathBuf) -> Result<Self> {
        info!("Initializing new database");

        let metadata = DatabaseMetadata::new();

        // Create all tables and write metadata in a single transaction
        let write_txn = db.begin_write().map_err(StorageError::from)?;

        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = bincode::serialize(&metadata)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            meta_table.insert(METADATA_KEY, metadata_bytes.as_slice())?;

            // Create other tables (they're created on first access)
            let _ = write_txn.open_table(PREFERENCES_TABLE)?;
            let _ = write_txn.open_table(STATS_TABLE)?;
            let _ = write_txn.open_table(SAVED_TIPS_TABLE)?;
            let _ = write_txn.open_table(EVENTS_TABLE)?;
        }

        write_txn.commit().map_err(StorageError::from)?;

        info!(schema_version = SCHEMA_VERSION, "Database initialized");

        Ok(Self { db, metadata, path })
    }

    /// Opens and validates an existing database.
    #[instrument(skip(db), fields(path = %path.display()))]
    fn open_existing(db: Database, path: PathBuf) -> Result<Self> {
        info!("Opening existing database");

        // Read metadata from the database
        let read_txn = db.begin_read().map_err(StorageError::from)?;

        let metadata = {
            let meta_table = read_txn.open_table(METADATA_TABLE).map_err(|e| {
                StorageError::corrupted(format!("Cannot open metadata table: {}", e))
            })?;

            let metadata_bytes = meta_table
                .get(METADATA_KEY)
                .map_err(StorageError::from)?
                .ok_or_else(|| StorageError::corrupted("Missing database metadata"))?;

            bincode::deserialize::<DatabaseMetadata>(metadata_bytes.value())
                .map_err(|e| StorageError::corrupted(format!("Invalid metadata format: {}", e)))?
        };

        drop(read_txn);

        // Validate schema version
        if metadata.schema_version != SCHEMA_VERSION {
            warn!(
                expected = SCHEMA_VERSION,
                found = metadata.schema_version,
                "Schema version mismatch"
            );
            return Err(MotivError::Storage(StorageError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: metadata.schema_version,
            }));
        }

        // Update last_opened_at timestamp
        let mut metadata = metadata;
        metadata.touch();

        let write_txn = db.begin_write().map_err(StorageError::from)?;
        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = bincode::serialize(&metadata)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            meta_table.insert(METADATA_KEY, metadata_bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        info!(schema_version = metadata.schema_version, "Database opened successfully");

        Ok(Self { db, metadata, path })
    }

    /// Writes a singleton row in its own transaction.
    fn save_singleton<T: serde::Serialize>(
        &self,
        table_def: TableDefinition<'static, &'static str, &'static [u8]>,
        record: &T,
    ) -> Result<()> {
        let bytes =
            bincode::serialize(record).map_err(|e| StorageError::serialization(e.to_string()))?;

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut table = write_txn.open_table(table_def)?;
            table.insert(SINGLETON_KEY, bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        Ok(())
    }

    /// Reads a singleton row, degrading malformed data to `None`.
    fn load_singleton<T: DeserializeOwned>(
        &self,
        table_def: TableDefinition<'static, &'static str, &'static [u8]>,
        entity: &'static str,
    ) -> Result<Option<T>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = match read_txn.open_table(table_def) {
            Ok(table) => table,
            // A database created before this table existed simply has no data
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(StorageError::from(e).into()),
        };

        match table.get(SINGLETON_KEY)? {
            Some(value) => Ok(decode_row(value.value(), entity)),
            None => Ok(None),
        }
    }
}

/// Decodes a bincode row, treating malformed bytes as absent data.
fn decode_row<T: DeserializeOwned>(bytes: &[u8], entity: &'static str) -> Option<T> {
    match bincode::deserialize(bytes) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(entity, %err, "Malformed row treated as absent");
            None
        }
    }
}

impl StorageEngine for RedbStorage {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn metadata(&self) -> &DatabaseMetadata {
        &self.metadata
    }

    #[instrument(skip(self))]
    fn close(self: Box<Self>) -> Result<()> {
        info!("Closing storage engine");

        // redb flushes all data durably on drop. Since `Database::drop` is
        // infallible, this method currently always returns Ok(()). The Result
        // return type is retained for API forward-compatibility if a future
        // storage backend can report flush errors.
        drop(self.db);

        info!("Storage engine closed");
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    // =========================================================================
    // Preferences (singleton)
    // =========================================================================

    fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.save_singleton(PREFERENCES_TABLE, preferences)?;
        debug!(
            cluster = %preferences.course_cluster,
            style = %preferences.learning_style,
            "Preferences saved"
        );
        Ok(())
    }

    fn load_preferences(&self) -> Result<Option<Preferences>> {
        self.load_singleton(PREFERENCES_TABLE, "preferences")
    }

    fn delete_preferences(&self) -> Result<bool> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let existed;
        {
            let mut table = write_txn.open_table(PREFERENCES_TABLE)?;
            existed = table.remove(SINGLETON_KEY)?.is_some();
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(existed, "Preferences cleared");
        Ok(existed)
    }

    // =========================================================================
    // Progress stats (singleton)
    // =========================================================================

    fn save_stats(&self, stats: &ProgressStats) -> Result<()> {
        self.save_singleton(STATS_TABLE, stats)?;
        debug!(
            streak = stats.motivation_streak,
            days_active = stats.days_active,
            "Stats saved"
        );
        Ok(())
    }

    fn load_stats(&self) -> Result<Option<ProgressStats>> {
        self.load_singleton(STATS_TABLE, "stats")
    }

    // =========================================================================
    // Saved tips (append-only)
    // =========================================================================

    fn append_saved_tip(&self, tip: &SavedTip) -> Result<TipId> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let assigned;
        {
            let mut table = write_txn.open_table(SAVED_TIPS_TABLE)?;

            // Nudge the instant-derived id forward until it is unique
            let mut id = tip.id;
            while table.get(id.as_millis())?.is_some() {
                id = id.next();
            }

            let stored = SavedTip {
                id,
                ..tip.clone()
            };
            let bytes = bincode::serialize(&stored)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            table.insert(id.as_millis(), bytes.as_slice())?;
            assigned = id;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %assigned, "Saved tip appended");
        Ok(assigned)
    }

    fn list_saved_tips(&self) -> Result<Vec<SavedTip>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = match read_txn.open_table(SAVED_TIPS_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::from(e).into()),
        };

        let mut tips = Vec::new();
        for result in table.iter()? {
            let (_, value) = result.map_err(StorageError::from)?;
            if let Some(tip) = decode_row(value.value(), "saved_tip") {
                tips.push(tip);
            }
        }

        Ok(tips)
    }

    // =========================================================================
    // Analytics events (bounded FIFO)
    // =========================================================================

    fn append_event(&self, event: &AnalyticsEvent, capacity: usize) -> Result<()> {
        let bytes =
            serde_json::to_vec(event).map_err(|e| StorageError::serialization(e.to_string()))?;

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut table = write_txn.open_table(EVENTS_TABLE)?;

            let next_seq = table.last()?.map(|(key, _)| key.value() + 1).unwrap_or(0);
            table.insert(next_seq, bytes.as_slice())?;

            // FIFO eviction: drop the oldest rows beyond capacity
            while table.len()? > capacity as u64 {
                let Some(oldest) = table.first()?.map(|(key, _)| key.value()) else {
                    break;
                };
                table.remove(oldest)?;
            }
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(name = %event.name, "Event recorded");
        Ok(())
    }

    fn list_events(&self) -> Result<Vec<AnalyticsEvent>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = match read_txn.open_table(EVENTS_TABLE) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::from(e).into()),
        };

        let mut events = Vec::new();
        for result in table.iter()? {
            let (_, value) = result.map_err(StorageError::from)?;
            match serde_json::from_slice(value.value()) {
                Ok(event) => events.push(event),
                Err(err) => warn!(entity = "event", %err, "Malformed row skipped"),
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{ConfidenceLevel, CourseCluster, LearningStyle};
    use crate::types::Timestamp;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn open_temp() -> (tempfile::TempDir, RedbStorage) {
        let dir = tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("test.db")).unwrap();
        (dir, storage)
    }

    fn sample_preferences() -> Preferences {
        Preferences {
            course_cluster: CourseCluster::Health,
            learning_style: LearningStyle::Social,
            confidence_level: ConfidenceLevel::new(2).unwrap(),
            timestamp: Timestamp::from_millis(1700000000000),
        }
    }

    #[test]
    fn test_preferences_roundtrip() {
        let (_dir, storage) = open_temp();

        assert!(storage.load_preferences().unwrap().is_none());

        let prefs = sample_preferences();
        storage.save_preferences(&prefs).unwrap();
        assert_eq!(storage.load_preferences().unwrap(), Some(prefs));
    }

    #[test]
    fn test_preferences_replaced_wholesale() {
        let (_dir, storage) = open_temp();

        storage.save_preferences(&sample_preferences()).unwrap();

        let replacement = Preferences {
            course_cluster: CourseCluster::Design,
            ..sample_preferences()
        };
        storage.save_preferences(&replacement).unwrap();

        assert_eq!(storage.load_preferences().unwrap(), Some(replacement));
    }

    #[test]
    fn test_delete_preferences() {
        let (_dir, storage) = open_temp();

        assert!(!storage.delete_preferences().unwrap());
        storage.save_preferences(&sample_preferences()).unwrap();
        assert!(storage.delete_preferences().unwrap());
        assert!(storage.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_stats_roundtrip() {
        let (_dir, storage) = open_temp();

        let stats = ProgressStats::first_visit(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        storage.save_stats(&stats).unwrap();
        assert_eq!(storage.load_stats().unwrap(), Some(stats));
    }

    #[test]
    fn test_malformed_singleton_degrades_to_absent() {
        let (_dir, storage) = open_temp();

        // Write garbage bytes directly into the preferences row
        let write_txn = storage.db.begin_write().unwrap();
        {
            let mut table = write_txn.open_table(PREFERENCES_TABLE).unwrap();
            table.insert(SINGLETON_KEY, [0xFF, 0x00, 0xFF].as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        assert!(storage.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_saved_tip_collision_nudges_id() {
        let (_dir, storage) = open_temp();

        let tip = SavedTip {
            id: TipId::from_millis(1000),
            title: "t".into(),
            description: "d".into(),
            saved_at: "2024-03-01".into(),
        };

        let first = storage.append_saved_tip(&tip).unwrap();
        let second = storage.append_saved_tip(&tip).unwrap();

        assert_eq!(first, TipId::from_millis(1000));
        assert_eq!(second, TipId::from_millis(1001));

        let tips = storage.list_saved_tips().unwrap();
        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0].id, first);
        assert_eq!(tips[1].id, second);
    }

    #[test]
    fn test_event_fifo_eviction() {
        let (_dir, storage) = open_temp();

        for i in 0..5 {
            let event = AnalyticsEvent::new(
                format!("event_{i}"),
                BTreeMap::new(),
                Timestamp::from_millis(i),
            );
            storage.append_event(&event, 3).unwrap();
        }

        let events = storage.list_events().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].name, "event_2");
        assert_eq!(events[2].name, "event_4");
    }

    #[test]
    fn test_events_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let storage = RedbStorage::open(&path).unwrap();
            let event =
                AnalyticsEvent::new("onboarding_completed", BTreeMap::new(), Timestamp::now());
            storage.append_event(&event, 100).unwrap();
        }

        let storage = RedbStorage::open(&path).unwrap();
        let events = storage.list_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "onboarding_completed");
    }

    #[test]
    fn test_metadata_preserved_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let storage = RedbStorage::open(&path).unwrap();
        let created_at = storage.metadata().created_at;
        drop(storage);

        std::thread::sleep(std::time::Duration::from_millis(5));

        let storage = RedbStorage::open(&path).unwrap();
        assert_eq!(storage.metadata().created_at, created_at);
        assert!(storage.metadata().last_opened_at > created_at);
    }
}
