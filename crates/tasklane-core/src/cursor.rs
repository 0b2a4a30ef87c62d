use crate::parse::TaskRecord;
use crate::state::PersistedState;

/// Result of a pointer read: the record under the pointer, or the terminal
/// marker once the pointer has reached the task count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Task(TaskRecord),
    Done,
}

/// Return the record at the current pointer without advancing.
pub fn peek(state: &mut PersistedState, records: &[TaskRecord]) -> Step {
    let index = state.clamp_index(records.len());
    match records.get(index) {
        Some(record) => Step::Task(record.clone()),
        None => Step::Done,
    }
}

/// Return the current record, mark its position complete, and advance the
/// pointer. Fingerprint history is deliberately not touched here; that is
/// the job of an explicit complete call. Advancing past the end is a no-op
/// returning `Done`, never an error.
pub fn advance(state: &mut PersistedState, records: &[TaskRecord]) -> Step {
    let index = state.clamp_index(records.len());
    let Some(record) = records.get(index) else {
        return Step::Done;
    };
    state.completed_tasks.insert(index);
    state.index += 1;
    Step::Task(record.clone())
}

/// Move the pointer back to the first task. Completion sets are untouched.
pub fn reset(state: &mut PersistedState) {
    state.index = 0;
}

/// Jump the pointer to `requested`, clamped into [0, total]. Clamping is the
/// declared boundary policy: out-of-range input is never an error.
pub fn goto(state: &mut PersistedState, total: usize, requested: i64) -> usize {
    let clamped = if requested < 0 {
        0
    } else {
        (requested as usize).min(total)
    };
    state.index = clamped;
    clamped
}
