//! Error types for PolyMotiv.
//!
//! PolyMotiv uses a hierarchical error system:
//! - `MotivError` is the top-level error returned by all public APIs
//! - Specific error types (`StorageError`, `ValidationError`) provide detail
//!
//! # Error Handling Pattern
//! ```rust,ignore
//! use polymotiv::{Motivator, Config, Result};
//!
//! fn example() -> Result<()> {
//!     let app = Motivator::open("./motiv.db", Config::default())?;
//!     // ... operations that may fail ...
//!     app.close()?;
//!     Ok(())
//! }
//! ```
//!
//! Note that per the degradation policy, *reads* of persisted entities never
//! surface `StorageError` to callers — malformed or absent data degrades to
//! the entity default. Only open/close and the writes that affect
//! personalization correctness (preferences, stats) propagate storage errors.

use thiserror::Error;

/// Result type alias for PolyMotiv operations.
pub type Result<T> = std::result::Result<T, MotivError>;

/// Top-level error enum for all PolyMotiv operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum MotivError {
    /// Storage layer error (I/O, corruption, transactions).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Form or input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of what's wrong with the configuration.
        reason: String,
    },

    /// Catalog lookup produced no candidates.
    ///
    /// Only reachable with a custom catalog whose fallback pools are empty;
    /// the builtin catalog always has candidates.
    #[error("Content lookup failed: {0}")]
    Lookup(String),

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MotivError {
    /// Creates a configuration error with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Creates a content lookup error with the given message.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a storage error.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this is a content lookup error.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

/// Storage-related errors.
///
/// These errors indicate problems with the underlying storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database file or data is corrupted.
    #[error("Database corrupted: {0}")]
    Corrupted(String),

    /// Database is locked by another process.
    #[error("Database is locked by another writer")]
    DatabaseLocked,

    /// Transaction failed (commit, rollback, etc.).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the redb storage engine.
    #[error("Storage engine error: {0}")]
    Redb(String),

    /// Database schema version doesn't match expected version.
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// Expected schema version.
        expected: u32,
        /// Actual schema version found in database.
        found: u32,
    },
}

impl StorageError {
    /// Creates a corruption error with the given message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Creates a transaction error with the given message.
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    /// Creates a serialization error with the given message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a redb error with the given message.
    pub fn redb(msg: impl Into<String>) -> Self {
        Self::Redb(msg.into())
    }
}

// Conversions from redb error types
impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(format!("Commit failed: {}", err))
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Redb(format!("Table error: {}", err))
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Redb(format!("Storage error: {}", err))
    }
}

// Convert serialization errors to StorageError
impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// Also allow direct conversion to MotivError for convenience
impl From<redb::Error> for MotivError {
    fn from(err: redb::Error) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

impl From<redb::DatabaseError> for MotivError {
    fn from(err: redb::DatabaseError) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

impl From<redb::TransactionError> for MotivError {
    fn from(err: redb::TransactionError) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

impl From<redb::CommitError> for MotivError {
    fn from(err: redb::CommitError) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

impl From<redb::TableError> for MotivError {
    fn from(err: redb::TableError) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

impl From<redb::StorageError> for MotivError {
    fn from(err: redb::StorageError) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

impl From<bincode::Error> for MotivError {
    fn from(err: bincode::Error) -> Self {
        MotivError::Storage(StorageError::from(err))
    }
}

/// Validation errors for onboarding form input.
///
/// These are recoverable, user-facing errors: they block a step transition
/// and name the first offending field or choice group, but never abort the
/// flow. The UI surfaces `to_string()` directly as the notice text.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required text field is missing or empty.
    #[error("Please complete the required field '{field}'")]
    RequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// A required choice group has no selected option.
    #[error("Please select an option for {group}")]
    ChoiceRequired {
        /// Name of the choice group.
        group: String,
    },

    /// A choice group that requires exactly one selection has several.
    #[error("Only one option may be selected for {group}")]
    MultipleSelections {
        /// Name of the choice group.
        group: String,
    },

    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },
}

impl ValidationError {
    /// Creates a required field error.
    pub fn required_field(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    /// Creates a choice required error.
    pub fn choice_required(group: impl Into<String>) -> Self {
        Self::ChoiceRequired {
            group: group.into(),
        }
    }

    /// Creates a multiple selections error.
    pub fn multiple_selections(group: impl Into<String>) -> Self {
        Self::MultipleSelections {
            group: group.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field or group.
    pub fn field(&self) -> &str {
        match self {
            Self::RequiredField { field } => field,
            Self::ChoiceRequired { group } => group,
            Self::MultipleSelections { group } => group,
            Self::InvalidField { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MotivError::config("event log capacity must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: event log capacity must be positive"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::SchemaVersionMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Schema version mismatch: expected 2, found 1"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::choice_required("course cluster");
        assert_eq!(err.to_string(), "Please select an option for course cluster");
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::required_field("confidence_level");
        assert_eq!(err.field(), "confidence_level");

        let err = ValidationError::multiple_selections("learning style");
        assert_eq!(err.field(), "learning style");
    }

    #[test]
    fn test_is_validation() {
        let err: MotivError = ValidationError::required_field("confidence_level").into();
        assert!(err.is_validation());
        assert!(!err.is_storage());
    }

    #[test]
    fn test_is_lookup() {
        let err = MotivError::lookup("motivation pool is empty");
        assert!(err.is_lookup());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_conversion_chain() {
        // Simulate a storage error propagating up
        fn inner() -> Result<()> {
            Err(StorageError::corrupted("test corruption"))?
        }

        let result = inner();
        assert!(result.is_err());
        assert!(result.unwrap_err().is_storage());
    }
}
