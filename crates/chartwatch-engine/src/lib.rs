//! Chartwatch Engine - Orchestration layer
//!
//! Coordinates chart sources, the pure extraction and diff logic in
//! `chartwatch-core` and the snapshot directory in `chartwatch-store`.

pub mod clock;
pub mod commands;
pub mod config;
pub mod fetch;

pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::compare::{compare_snapshots, Comparison};
pub use commands::run::{run_pipeline, RunOutcome};
pub use config::PipelineConfig;
pub use fetch::{ChartSource, FileSource, HttpSource};
