//! Database schema definitions and versioning.
//!
//! This module defines the table structure for the redb storage engine.
//! All table definitions are compile-time constants to ensure consistency.
//!
//! # Schema Versioning
//!
//! The schema version is stored in the metadata table. When opening an
//! existing database, we check the version and fail if it doesn't match.
//! Migration support will be added in a future release.
//!
//! # Table Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ METADATA_TABLE                                               │
//! │   Key: &str                                                  │
//! │   Value: &[u8] (bincode)                                     │
//! │   Entries: "db_metadata" -> DatabaseMetadata                 │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ PREFERENCES_TABLE / STATS_TABLE (singleton rows)             │
//! │   Key: &str ("current")                                      │
//! │   Value: &[u8] (bincode-serialized record)                   │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ SAVED_TIPS_TABLE                                             │
//! │   Key: i64 (TipId as epoch millis; numeric order = save      │
//! │        order)                                                │
//! │   Value: &[u8] (bincode-serialized SavedTip)                 │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EVENTS_TABLE                                                 │
//! │   Key: u64 (monotonic sequence number)                       │
//! │   Value: &[u8] (JSON-serialized AnalyticsEvent, kept          │
//! │        human-readable for inspection)                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use redb::TableDefinition;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Current schema version.
///
/// Increment this when making breaking changes to the schema.
/// The database will refuse to open if versions don't match.
pub const SCHEMA_VERSION: u32 = 1;

/// Key under which the singleton preference and stats rows are stored.
pub const SINGLETON_KEY: &str = "current";

// ============================================================================
// Table Definitions
// ============================================================================

/// Metadata table for database-level information.
///
/// Stores schema version and lifecycle timestamps.
pub const METADATA_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("metadata");

/// Preferences table (singleton row under [`SINGLETON_KEY`]).
pub const PREFERENCES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("preferences");

/// Progress stats table (singleton row under [`SINGLETON_KEY`]).
pub const STATS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("stats");

/// Saved tips table.
///
/// Key: TipId as epoch milliseconds. redb orders integer keys numerically,
/// so iteration order is save order.
pub const SAVED_TIPS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("saved_tips");

/// Analytics events table.
///
/// Key: monotonic sequence number. Appends trim the smallest keys beyond
/// the configured capacity (FIFO eviction).
pub const EVENTS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("events");

// ============================================================================
// Database Metadata
// ============================================================================

/// Database metadata stored in the metadata table.
///
/// This is serialized with bincode and stored under the key "db_metadata".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    /// Schema version for compatibility checking.
    pub schema_version: u32,

    /// Timestamp when the database was created.
    pub created_at: Timestamp,

    /// Last time the database was opened (updated on each open).
    pub last_opened_at: Timestamp,
}

impl DatabaseMetadata {
    /// Creates new metadata for a fresh database.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: now,
            last_opened_at: now,
        }
    }

    /// Updates the last_opened_at timestamp.
    pub fn touch(&mut self) {
        self.last_opened_at = Timestamp::now();
    }

    /// Checks if this metadata is compatible with the current schema.
    pub fn is_compatible(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }
}

impl Default for DatabaseMetadata {
    fn default() -> Self {
        Self::new()
    }
}
