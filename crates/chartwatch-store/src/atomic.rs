//! Atomic write primitives
//!
//! Uses temp→rename pattern so a reader never sees a partial snapshot

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// The temp file sits next to the target so the rename stays on one
/// filesystem. An existing target is replaced.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", e))?;
    }

    let temp_path = target_path.with_extension("json.tmp");

    fs::write(&temp_path, content).map_err(|e| io_error("write_snapshot_temp", e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("rename_snapshot_temp", e));
    }

    Ok(())
}
