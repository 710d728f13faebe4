//! Human-readable console summary for a chart snapshot.

use crate::diff::model::MovedEntry;
use crate::model::entry::Entry;
use crate::model::snapshot::Snapshot;

const NEW_PREVIEW: usize = 5;
const UNCHANGED_PREVIEW: usize = 3;
const FIRST_RUN_PREVIEW: usize = 10;

/// Render the run summary printed after each capture.
///
/// Lists counts for each bucket with the leading items (new: 5, moved: all,
/// unchanged: 3). A snapshot without a comparison basis lists its top 10
/// entries instead. Baseline snapshots are marked as such.
pub fn render_human_summary(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Chart changes ({}) ===\n", snapshot.date));
    out.push_str(&format!("Total: {} songs\n", snapshot.songs.len()));
    if snapshot.note.is_baseline() {
        out.push_str("[baseline data] live capture failed, fixed dataset substituted\n");
    }

    if !snapshot.has_comparison() {
        out.push_str("\n(first run, no previous snapshot to compare)\n");
        for entry in snapshot.songs.iter().take(FIRST_RUN_PREVIEW) {
            out.push_str(&entry_line(entry));
        }
        return out;
    }

    let changes = &snapshot.changes;

    out.push_str(&format!("\nNew entries ({}):\n", changes.new_entries.len()));
    for entry in changes.new_entries.iter().take(NEW_PREVIEW) {
        out.push_str(&entry_line(entry));
    }
    push_more(&mut out, changes.new_entries.len(), NEW_PREVIEW);

    out.push_str(&format!("\nMoved ({}):\n", changes.moved.len()));
    for moved in &changes.moved {
        out.push_str(&moved_line(moved));
    }

    out.push_str(&format!("\nUnchanged ({}):\n", changes.unchanged.len()));
    for entry in changes.unchanged.iter().take(UNCHANGED_PREVIEW) {
        out.push_str(&entry_line(entry));
    }
    push_more(&mut out, changes.unchanged.len(), UNCHANGED_PREVIEW);

    out
}

fn entry_line(entry: &Entry) -> String {
    format!("  {}. {} - {}\n", entry.rank, entry.title, entry.singer)
}

fn moved_line(moved: &MovedEntry) -> String {
    let arrow = if moved.climbed() { '↑' } else { '↓' };
    format!(
        "  {} → {} {}{}: {} - {}\n",
        moved.previous_rank,
        moved.entry.rank,
        arrow,
        moved.change.unsigned_abs(),
        moved.entry.title,
        moved.entry.singer
    )
}

fn push_more(out: &mut String, len: usize, shown: usize) {
    if len > shown {
        out.push_str(&format!("  ... {} more\n", len - shown));
    }
}
