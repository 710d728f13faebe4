//! Delta between two stored snapshots.

use chartwatch_core::diff::compute_delta;
use chartwatch_core::errors::{ExError, ExErrorKind, Result};
use chartwatch_core::model::{date_key, Snapshot};
use chartwatch_core::{log_op_end, log_op_error, log_op_start};
use chartwatch_store::SnapshotStore;
use chrono::NaiveDate;

/// Two stored snapshots and the delta of the later against the earlier.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub from: NaiveDate,
    /// The `to` snapshot with `changes` recomputed against `from`
    pub snapshot: Snapshot,
}

/// Recompute the delta of the `to` snapshot against the `from` snapshot.
///
/// Read-only: nothing is written back to the store.
///
/// # Errors
///
/// - `InvalidInput`: `from` is not earlier than `to`
/// - `NotFound`: either date has no stored snapshot
pub fn compare_snapshots(
    store: &SnapshotStore,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Comparison> {
    log_op_start!("compare_snapshots", from = %date_key(from), to = %date_key(to));
    let start = std::time::Instant::now();

    let result = compare_snapshots_impl(store, from, to).map_err(|e| {
        log_op_error!(
            "compare_snapshots",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "compare_snapshots",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(result)
}

fn compare_snapshots_impl(
    store: &SnapshotStore,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Comparison> {
    if from >= to {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("compare_snapshots")
            .with_message(format!(
                "--from {} must be earlier than --to {}",
                date_key(from),
                date_key(to)
            )));
    }

    let earlier = store.load(from)?;
    let mut later = store.load(to)?;
    later.changes = compute_delta(&later.songs, Some(earlier.songs.as_slice()));

    Ok(Comparison {
        from,
        snapshot: later,
    })
}
