//! Chart data model: ranked entries and dated snapshots.

pub mod date;
pub mod entry;
pub mod snapshot;

pub use date::{date_key, parse_chart_date};
pub use entry::{Entry, DEFAULT_DURATION, UNKNOWN_SINGER};
pub use snapshot::{ProvenanceNote, Snapshot};
