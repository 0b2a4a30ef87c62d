use std::collections::{BTreeMap, BTreeSet};

use crate::hash::Fingerprint;
use crate::parse::TaskRecord;
use crate::state::PersistedState;

/// Resolve drift between a stale persisted state and the current task list.
///
/// Positional fields are rebuilt from content: a task keeps its completed
/// status wherever its fingerprint landed, so reordering or renumbering the
/// file does not lose progress. `completed_hashes` is carried forward
/// unchanged; the history only grows, so content removed from the file and
/// later re-added identically is still recognized as complete. Idempotent.
pub fn reconcile(state: &mut PersistedState, records: &[TaskRecord]) {
    let current: BTreeMap<usize, Fingerprint> = records
        .iter()
        .map(|record| (record.index, record.fingerprint()))
        .collect();

    let completed: BTreeSet<usize> = current
        .iter()
        .filter(|(_, hash)| state.completed_hashes.contains(hash))
        .map(|(index, _)| *index)
        .collect();

    state.completed_tasks = completed;
    state.task_hashes = current;
    state.clamp_index(records.len());
}
