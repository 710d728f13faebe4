//! Snapshot persistence operations.

use crate::atomic::atomic_write;
use crate::errors::{encode_error, Result};
use crate::snapshot::SnapshotStore;
use chartwatch_core::model::Snapshot;
use std::path::PathBuf;

impl SnapshotStore {
    /// Persist a snapshot under its date.
    ///
    /// Writes pretty-printed JSON through a temp file and rename, creating the
    /// directory when needed. Saving twice for the same date leaves exactly
    /// one file holding the second snapshot.
    ///
    /// # Errors
    ///
    /// - `Serialization`: the snapshot could not be encoded
    /// - `Io`: the directory or file could not be written
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        let json =
            serde_json::to_string_pretty(snapshot).map_err(|e| encode_error("save_snapshot", e))?;
        let path = self.path_for(snapshot.date);

        atomic_write(&path, json.as_bytes())
            .map_err(|e| e.with_entity_id(path.display().to_string()))?;

        tracing::debug!(
            path = %path.display(),
            entry_count = snapshot.songs.len(),
            "snapshot persisted"
        );

        Ok(path)
    }
}
