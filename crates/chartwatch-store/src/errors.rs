//! Error handling for chartwatch-store
//!
//! Wraps chartwatch-core ExError with store-specific helpers

use chartwatch_core::errors::{ExError, ExErrorKind};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Failures specific to the snapshot directory layout
#[derive(Error, Debug)]
pub enum StoreError {
    /// No snapshot file exists for the requested date
    #[error("No snapshot stored for {date}")]
    SnapshotMissing { date: String },

    /// A snapshot file exists but is not a valid snapshot document
    #[error("Snapshot file {path} is corrupt: {reason}")]
    CorruptSnapshot { path: String, reason: String },

    /// A snapshot's own date disagrees with the file it was stored under
    #[error("Snapshot dated {found} stored as {expected}")]
    DateMismatch { expected: String, found: String },
}

impl From<StoreError> for ExError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SnapshotMissing { ref date } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(date.clone())
                .with_message(err.to_string()),
            StoreError::CorruptSnapshot { ref path, .. } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_entity_id(path.clone())
                    .with_message(err.to_string())
            }
            StoreError::DateMismatch { ref expected, .. } => {
                ExError::new(ExErrorKind::Persistence)
                    .with_entity_id(expected.clone())
                    .with_message(err.to_string())
            }
        }
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error for a snapshot being written
pub fn encode_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error for a stored file that does not decode
pub fn corrupt_snapshot(
    operation: &str,
    path: &std::path::Path,
    err: serde_json::Error,
) -> ExError {
    ExError::from(StoreError::CorruptSnapshot {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
    .with_op(operation.to_string())
}

/// Create a not-found error for a date without a stored snapshot
pub fn snapshot_missing(operation: &str, date: &str) -> ExError {
    ExError::from(StoreError::SnapshotMissing {
        date: date.to_string(),
    })
    .with_op(operation.to_string())
}
