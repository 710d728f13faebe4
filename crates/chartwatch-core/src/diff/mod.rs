//! Snapshot diff engine.
//!
//! Classifies every entry of the current chart against the most recent
//! previous chart into exactly one of three buckets: new, moved or unchanged.
//!
//! ## Entry point
//!
//! ```ignore
//! use chartwatch_core::diff::engine::compute_delta;
//!
//! let delta = compute_delta(&current, previous.as_deref());
//! let summary = chartwatch_core::diff::human_summary::render_human_summary(&snapshot);
//! ```
//!
//! ## Guarantees
//!
//! - **First run**: with no previous chart all buckets are empty.
//! - **Partition**: each current entry appears in exactly one bucket.
//! - **Order**: buckets follow the current chart's ascending rank.
//! - Entries that dropped off the chart are not reported.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_delta;
pub use human_summary::render_human_summary;
pub use model::{Delta, DeltaCounts, MovedEntry};
