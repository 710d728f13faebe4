//! Delta output types.
//!
//! Field names follow the persisted snapshot format (`newEntries`,
//! `previousRank`).

use serde::{Deserialize, Serialize};

use crate::model::entry::Entry;

/// Three-way classification of a chart relative to a previous chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    /// Entries whose identity key was absent from the previous chart
    pub new_entries: Vec<Entry>,
    /// Entries present in both charts at different ranks
    pub moved: Vec<MovedEntry>,
    /// Entries present in both charts at the same rank
    pub unchanged: Vec<Entry>,
}

impl Delta {
    pub fn counts(&self) -> DeltaCounts {
        DeltaCounts {
            new_entries: self.new_entries.len(),
            moved: self.moved.len(),
            unchanged: self.unchanged.len(),
        }
    }
}

/// An entry that changed rank, annotated with where it was before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovedEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub previous_rank: u32,
    /// `previous_rank - rank`; positive means the song climbed toward rank 1
    pub change: i64,
}

impl MovedEntry {
    pub fn new(entry: Entry, previous_rank: u32) -> Self {
        let change = i64::from(previous_rank) - i64::from(entry.rank);
        Self {
            entry,
            previous_rank,
            change,
        }
    }

    pub fn climbed(&self) -> bool {
        self.change > 0
    }
}

/// Bucket sizes of a [`Delta`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaCounts {
    pub new_entries: usize,
    pub moved: usize,
    pub unchanged: usize,
}

impl DeltaCounts {
    pub fn total(&self) -> usize {
        self.new_entries + self.moved + self.unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_entry_sign_convention() {
        let up = MovedEntry::new(Entry::new(1, "B", "Y"), 4);
        assert_eq!(up.change, 3);
        assert!(up.climbed());

        let down = MovedEntry::new(Entry::new(9, "C", "Z"), 2);
        assert_eq!(down.change, -7);
        assert!(!down.climbed());
    }

    #[test]
    fn test_moved_entry_serializes_flat() {
        let moved = MovedEntry::new(Entry::new(1, "B", "Y"), 2);
        let value = serde_json::to_value(&moved).unwrap();
        assert_eq!(value["rank"], 1);
        assert_eq!(value["title"], "B");
        assert_eq!(value["previousRank"], 2);
        assert_eq!(value["change"], 1);

        let back: MovedEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, moved);
    }
}
