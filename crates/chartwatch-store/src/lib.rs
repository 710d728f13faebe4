//! Chartwatch Store - dated snapshot persistence on the local filesystem
//!
//! Provides:
//! - One pretty-printed JSON document per chart date (`<dir>/YYYY-MM-DD.json`)
//! - Whole-file atomic writes (temp file + rename)
//! - Lookup of the most recent snapshot strictly before a date

pub mod atomic;
pub mod errors;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use snapshot::SnapshotStore;
