use thiserror::Error;

use crate::hash::Fingerprint;
use crate::parse::TaskRecord;
use crate::state::PersistedState;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Invalid task count: provide a positive number or leave it unset")]
    InvalidCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked {
        index: usize,
        fingerprint: Fingerprint,
        first_line: String,
    },
    /// The clamped index points past the last task; nothing to mark.
    NoTask { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnmarkOutcome {
    Cleared { index: usize, first_line: String },
    /// Not currently marked complete: a reported no-op, not an error.
    AlreadyPending { index: usize },
}

/// Outcome of a batch advance: the touched positions and their full
/// rule-annotated content, ready for external consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAdvance {
    pub touched: Vec<usize>,
    pub tasks: Vec<TaskRecord>,
    pub index: usize,
    pub total: usize,
}

fn clamp_requested(requested: i64, total: usize) -> usize {
    if requested < 0 {
        0
    } else {
        (requested as usize).min(total)
    }
}

/// Mark a task complete by position, recording its fingerprint so the mark
/// survives future reindexing. Idempotent.
pub fn complete(
    state: &mut PersistedState,
    records: &[TaskRecord],
    requested: i64,
) -> MarkOutcome {
    let index = clamp_requested(requested, records.len());
    let Some(record) = records.get(index) else {
        return MarkOutcome::NoTask { index };
    };
    let fingerprint = record.fingerprint();
    state.completed_tasks.insert(index);
    state.completed_hashes.insert(fingerprint.clone());
    state.task_hashes.insert(index, fingerprint.clone());
    MarkOutcome::Marked {
        index,
        fingerprint,
        first_line: record.first_line().to_string(),
    }
}

/// Clear the positional mark only. The fingerprint stays in the completion
/// history, so a reconcile with unchanged content will re-mark the position;
/// history never forgets.
pub fn uncomplete(
    state: &mut PersistedState,
    records: &[TaskRecord],
    requested: i64,
) -> UnmarkOutcome {
    let index = clamp_requested(requested, records.len());
    if !state.completed_tasks.remove(&index) {
        return UnmarkOutcome::AlreadyPending { index };
    }
    let first_line = records
        .get(index)
        .map(|record| record.first_line().to_string())
        .unwrap_or_default();
    UnmarkOutcome::Cleared { index, first_line }
}

/// Clear every positional completion mark. Hash history is untouched.
/// Returns whether anything was cleared.
pub fn reset_status(state: &mut PersistedState) -> bool {
    let had_marks = !state.completed_tasks.is_empty();
    state.completed_tasks.clear();
    had_marks
}

/// Deprecated "start" operation: a read-only info query, no state change.
pub fn start_info(
    state: &mut PersistedState,
    records: &[TaskRecord],
    requested: i64,
) -> Option<(usize, String)> {
    state.clamp_index(records.len());
    let index = clamp_requested(requested, records.len());
    records
        .get(index)
        .map(|record| (index, record.first_line().to_string()))
}

/// Batched composition of advance: mark `count` consecutive positions from
/// the current pointer complete and move the pointer past them. `annotated`
/// must be the rule-annotated rendition of `records` (same count, same
/// indices); the annotated content is what gets returned for execution.
pub fn batch_advance(
    state: &mut PersistedState,
    records: &[TaskRecord],
    annotated: &[TaskRecord],
    count: Option<i64>,
) -> Result<BatchAdvance, StatusError> {
    let total = records.len();
    let index = state.clamp_index(total);
    let remaining = (total - index) as i64;

    let requested = count.unwrap_or(remaining);
    let resolved = requested.min(remaining);
    if resolved <= 0 {
        return Err(StatusError::InvalidCount);
    }
    let resolved = resolved as usize;

    let touched: Vec<usize> = (index..index + resolved).collect();
    for position in &touched {
        state.completed_tasks.insert(*position);
    }
    let tasks: Vec<TaskRecord> = annotated
        .iter()
        .filter(|record| touched.contains(&record.index))
        .cloned()
        .collect();
    state.index = index + resolved;

    Ok(BatchAdvance {
        touched,
        tasks,
        index: state.index,
        total,
    })
}
