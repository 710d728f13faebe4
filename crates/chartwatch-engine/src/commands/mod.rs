//! Command orchestration layer.
//!
//! Each command wires sources, the pure core logic and the snapshot store
//! together and logs its operation boundary.

pub mod compare;
pub mod run;
