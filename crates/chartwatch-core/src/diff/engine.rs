//! Delta computation.

use std::collections::HashMap;

use crate::diff::model::{Delta, MovedEntry};
use crate::model::entry::Entry;

/// Classify `current` against `previous`.
///
/// With `previous == None` (no earlier snapshot) every bucket is empty: there
/// is no basis for comparison, so nothing is reported as new.
///
/// When `previous` repeats an identity key the later entry's rank is used.
/// Repeated keys in `current` are each classified on their own against that
/// single previous rank.
pub fn compute_delta(current: &[Entry], previous: Option<&[Entry]>) -> Delta {
    let Some(previous) = previous else {
        return Delta::default();
    };

    let previous_ranks: HashMap<String, u32> = previous
        .iter()
        .map(|entry| (entry.identity_key(), entry.rank))
        .collect();

    let mut ordered: Vec<&Entry> = current.iter().collect();
    ordered.sort_by_key(|entry| entry.rank);

    let mut delta = Delta::default();
    for entry in ordered {
        match previous_ranks.get(&entry.identity_key()) {
            None => delta.new_entries.push(entry.clone()),
            Some(&previous_rank) if previous_rank != entry.rank => {
                delta.moved.push(MovedEntry::new(entry.clone(), previous_rank))
            }
            Some(_) => delta.unchanged.push(entry.clone()),
        }
    }

    tracing::debug!(
        current_len = current.len(),
        previous_len = previous.len(),
        new_count = delta.new_entries.len(),
        moved_count = delta.moved.len(),
        unchanged_count = delta.unchanged.len(),
        "delta computed"
    );

    delta
}
