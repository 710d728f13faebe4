//! Read-only snapshot queries.
//!
//! Date keys are compared as strings: `YYYY-MM-DD` sorts lexically in date
//! order, so no file is parsed until it has been selected.

use crate::errors::{corrupt_snapshot, io_error, snapshot_missing, Result, StoreError};
use crate::snapshot::{snapshot_key, SnapshotStore};
use chartwatch_core::errors::ExError;
use chartwatch_core::model::{date_key, Snapshot};
use chrono::NaiveDate;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

impl SnapshotStore {
    /// Most recent snapshot dated strictly before `date`.
    ///
    /// A missing or unreadable directory is the first-run state and yields
    /// `Ok(None)`, as does a directory with no earlier snapshot. A snapshot
    /// stored for `date` itself is never returned.
    ///
    /// # Errors
    ///
    /// - `Serialization`: the selected file is not a valid snapshot
    /// - `InvalidInput`: the selected snapshot's ranks are not 1..=N
    /// - `Io`: the selected file could not be read
    pub fn latest_before(&self, date: NaiveDate) -> Result<Option<Snapshot>> {
        let cutoff = date_key(date);
        let keys = match self.scan_keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(
                    dir = %self.dir().display(),
                    error = %e,
                    "snapshot directory unreadable"
                );
                return Ok(None);
            }
        };

        let Some(key) = keys.into_iter().filter(|key| *key < cutoff).max() else {
            tracing::debug!(before = %cutoff, "no earlier snapshot");
            return Ok(None);
        };

        tracing::debug!(before = %cutoff, previous_date = %key, "earlier snapshot selected");
        read_snapshot(&self.dir().join(format!("{key}.json")), &key, "latest_before").map(Some)
    }

    /// Load the snapshot stored for `date`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no snapshot is stored for `date`
    /// - `Serialization`: the file is not a valid snapshot
    /// - `Persistence`: the file holds a snapshot for another date
    /// - `InvalidInput`: the snapshot's ranks are not 1..=N
    pub fn load(&self, date: NaiveDate) -> Result<Snapshot> {
        let key = date_key(date);
        read_snapshot(&self.path_for(date), &key, "load_snapshot")
    }

    /// Stored snapshot dates, ascending. Empty when the directory is missing.
    ///
    /// # Errors
    ///
    /// - `Io`: the directory exists but could not be listed
    pub fn list_dates(&self) -> Result<Vec<String>> {
        match self.scan_keys() {
            Ok(mut keys) => {
                keys.sort();
                Ok(keys)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(io_error("list_snapshot_dates", e)
                .with_entity_id(self.dir().display().to_string())),
        }
    }

    fn scan_keys(&self) -> std::io::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(self.dir())? {
            let entry = entry?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(key) = entry.file_name().to_str().and_then(snapshot_key) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }
}

fn read_snapshot(path: &Path, key: &str, op: &str) -> Result<Snapshot> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(snapshot_missing(op, key)),
        Err(e) => return Err(io_error(op, e).with_entity_id(path.display().to_string())),
    };

    let snapshot: Snapshot =
        serde_json::from_str(&text).map_err(|e| corrupt_snapshot(op, path, e))?;

    let found = date_key(snapshot.date);
    if found != key {
        return Err(ExError::from(StoreError::DateMismatch {
            expected: key.to_string(),
            found,
        })
        .with_op(op.to_string()));
    }

    snapshot.check_ranks().map_err(|e| {
        ExError::from(e)
            .with_op(op.to_string())
            .with_entity_id(path.display().to_string())
    })?;

    Ok(snapshot)
}
