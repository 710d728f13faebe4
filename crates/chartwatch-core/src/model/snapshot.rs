use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::model::Delta;
use crate::errors::ChartError;
use crate::model::entry::Entry;

const LIVE_NOTE: &str = "真实抓取数据";
const BASELINE_NOTE: &str = "真实抓取失败，使用模拟数据";

/// Provenance marker stored in a snapshot's `note` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProvenanceNote {
    /// Entries were extracted from the live chart page
    Live,
    /// Live capture failed and the baseline dataset was substituted
    Baseline,
    /// Free text written by another producer, kept verbatim
    Other(String),
}

impl ProvenanceNote {
    pub fn as_str(&self) -> &str {
        match self {
            ProvenanceNote::Live => LIVE_NOTE,
            ProvenanceNote::Baseline => BASELINE_NOTE,
            ProvenanceNote::Other(text) => text,
        }
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self, ProvenanceNote::Baseline)
    }
}

impl From<String> for ProvenanceNote {
    fn from(value: String) -> Self {
        match value.as_str() {
            LIVE_NOTE => ProvenanceNote::Live,
            BASELINE_NOTE => ProvenanceNote::Baseline,
            _ => ProvenanceNote::Other(value),
        }
    }
}

impl From<ProvenanceNote> for String {
    fn from(note: ProvenanceNote) -> Self {
        match note {
            ProvenanceNote::Other(text) => text,
            other => other.as_str().to_string(),
        }
    }
}

/// One dated capture of a chart plus its delta against the prior capture.
///
/// Built once per run and persisted keyed by `date`; never modified after
/// it has been written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub songs: Vec<Entry>,
    pub changes: Delta,
    pub note: ProvenanceNote,
}

impl Snapshot {
    /// Whether `changes` was computed against an earlier snapshot.
    ///
    /// A first-run snapshot carries an empty delta; any compared snapshot with
    /// at least one song has every song in some bucket.
    pub fn has_comparison(&self) -> bool {
        self.changes.counts().total() > 0
    }

    /// Check that `songs` is ranked 1..=N in list order.
    ///
    /// # Errors
    ///
    /// - `ChartError::InvalidRank`: the first entry whose rank breaks the run
    pub fn check_ranks(&self) -> Result<(), ChartError> {
        for (entry, expected) in self.songs.iter().zip(1u32..) {
            if entry.rank != expected {
                return Err(ChartError::InvalidRank {
                    title: entry.title.clone(),
                    rank: entry.rank,
                    expected,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_note_roundtrips_known_and_unknown_text() {
        let live: ProvenanceNote = LIVE_NOTE.to_string().into();
        assert_eq!(live, ProvenanceNote::Live);
        let other: ProvenanceNote = "manual import".to_string().into();
        assert_eq!(other, ProvenanceNote::Other("manual import".to_string()));
        assert_eq!(String::from(other), "manual import");
    }

    #[test]
    fn test_snapshot_wire_format_field_names() {
        let snapshot = Snapshot {
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap(),
            songs: vec![Entry::new(1, "A", "X")],
            changes: Delta::default(),
            note: ProvenanceNote::Baseline,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["date"], "2026-10-17");
        assert_eq!(value["note"], BASELINE_NOTE);
        assert!(value["changes"]["newEntries"].is_array());
        assert!(value["changes"]["moved"].is_array());
        assert!(value["changes"]["unchanged"].is_array());
        assert_eq!(value["songs"][0]["rank"], 1);
    }

    fn with_songs(songs: Vec<Entry>) -> Snapshot {
        Snapshot {
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap(),
            songs,
            changes: Delta::default(),
            note: ProvenanceNote::Live,
        }
    }

    #[test]
    fn test_check_ranks_accepts_contiguous_and_empty() {
        assert!(with_songs(Vec::new()).check_ranks().is_ok());
        let songs = vec![Entry::new(1, "A", "X"), Entry::new(2, "B", "Y")];
        assert!(with_songs(songs).check_ranks().is_ok());
    }

    #[test]
    fn test_check_ranks_reports_first_gap() {
        let songs = vec![
            Entry::new(1, "A", "X"),
            Entry::new(3, "B", "Y"),
            Entry::new(4, "C", "Z"),
        ];
        let err = with_songs(songs).check_ranks().unwrap_err();
        assert_eq!(
            err,
            ChartError::InvalidRank {
                title: "B".to_string(),
                rank: 3,
                expected: 2,
            }
        );
    }

    #[test]
    fn test_check_ranks_rejects_zero_start() {
        let err = with_songs(vec![Entry::new(0, "A", "X")])
            .check_ranks()
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidRank { rank: 0, expected: 1, .. }));
    }

    #[test]
    fn test_reads_millisecond_timestamps() {
        let json = r#"{
            "date": "2026-02-01",
            "timestamp": "2026-02-01T01:02:03.456Z",
            "songs": [],
            "changes": {"newEntries": [], "moved": [], "unchanged": []},
            "note": "真实抓取数据"
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.note, ProvenanceNote::Live);
        assert!(!snapshot.has_comparison());
    }
}
