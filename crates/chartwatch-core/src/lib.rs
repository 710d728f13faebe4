//! Chartwatch Core - chart model, extraction and change detection
//!
//! This crate provides the pure building blocks of a chart capture run:
//! - Entry and snapshot models with the on-disk JSON wire format
//! - Tolerant HTML scanning and the ordered extraction strategies
//! - Snapshot-to-snapshot delta computation and the console summary
//! - The fixed baseline dataset used when a live capture is unusable
//! - Error and logging facilities shared by the other crates
//!
//! Nothing here touches the network or the filesystem.

pub mod baseline;
pub mod diff;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use baseline::baseline_entries;
pub use diff::{compute_delta, render_human_summary, Delta, DeltaCounts, MovedEntry};
pub use errors::{ChartError, ExError, ExErrorKind, Result};
pub use extract::{EntryDraft, Extraction, ExtractionStrategy, Extractor};
pub use model::{Entry, ProvenanceNote, Snapshot};
