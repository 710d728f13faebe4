//! Dated snapshot persistence.
//!
//! One JSON document per chart date, named `YYYY-MM-DD.json`, in a single
//! flat directory. Anything else in the directory (reports, temp files) is
//! ignored by every query.
//!
//! ## Responsibilities
//!
//! - Write a snapshot atomically, replacing a same-date file
//! - Find the most recent snapshot strictly before a date
//! - Load one snapshot or list the stored dates
//!
//! ## Non-Responsibilities
//!
//! - Delta computation (handled by `chartwatch-core`)
//! - Orchestration (handled by `chartwatch-engine`)

pub mod persist;
pub mod query;

use chartwatch_core::model::{date_key, parse_chart_date};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const SNAPSHOT_EXT: &str = ".json";

/// Handle on a snapshot directory. The directory need not exist yet.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a snapshot for `date` is stored at.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}{}", date_key(date), SNAPSHOT_EXT))
    }
}

/// Date key of a snapshot file name, `None` for any other file.
///
/// Only exact `YYYY-MM-DD.json` names that are real calendar dates qualify.
pub(crate) fn snapshot_key(file_name: &str) -> Option<&str> {
    let key = file_name.strip_suffix(SNAPSHOT_EXT)?;
    parse_chart_date(key).ok().map(|_| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_key_accepts_only_dated_json() {
        assert_eq!(snapshot_key("2026-01-02.json"), Some("2026-01-02"));
        assert_eq!(snapshot_key("report-2026-01-02.json"), None);
        assert_eq!(snapshot_key("2026-01-02.json.tmp"), None);
        assert_eq!(snapshot_key("2026-1-2.json"), None);
        assert_eq!(snapshot_key("2026-02-30.json"), None);
        assert_eq!(snapshot_key("notes.txt"), None);
    }

    #[test]
    fn test_path_for_uses_date_key() {
        let store = SnapshotStore::new("/data/kugou-charts");
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(
            store.path_for(date),
            PathBuf::from("/data/kugou-charts/2026-03-09.json")
        );
    }
}
