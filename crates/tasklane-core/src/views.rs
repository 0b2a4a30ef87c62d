//! Text renderings of the task list and operation outcomes, shared by the
//! CLI and the MCP tool layer.

use crate::cursor::Step;
use crate::parse::TaskRecord;
use crate::state::PersistedState;
use crate::status::{BatchAdvance, MarkOutcome, UnmarkOutcome};

pub const ALL_DONE: &str = "All tasks are done.";

/// Compact Markdown table: one row per task with its completion status.
pub fn task_table(records: &[TaskRecord], state: &PersistedState) -> String {
    let mut lines = vec![
        "| # | Status | Task |".to_string(),
        "|---|--------|------|".to_string(),
    ];
    for record in records {
        let status = if state.completed_tasks.contains(&record.index) {
            "done"
        } else {
            "pending"
        };
        lines.push(format!(
            "| {} | {} | {} |",
            record.index,
            status,
            record.first_line()
        ));
    }
    lines.join("\n")
}

/// Detailed listing: a status summary followed by every task in full.
pub fn task_details(records: &[TaskRecord], state: &PersistedState) -> String {
    let total = records.len();
    let done = records
        .iter()
        .filter(|record| state.completed_tasks.contains(&record.index))
        .count();
    let pending = total - done;

    let mut out = String::new();
    out.push_str("# Task list\n\n");
    out.push_str(&format!(
        "{total} task(s): {done} done, {pending} pending\n\n---\n"
    ));
    for record in records {
        let status = if state.completed_tasks.contains(&record.index) {
            "done"
        } else {
            "pending"
        };
        out.push_str(&format!(
            "\n## Task {} ({status})\n\n{}\n\n---\n",
            record.index, record.content
        ));
    }
    out
}

/// Post-reconciliation summary: totals, pointer, and each task's
/// fingerprint as recorded in the reconciled state.
pub fn sync_summary(records: &[TaskRecord], state: &PersistedState) -> String {
    let mut out = String::new();
    out.push_str("Task list and state reconciled.\n\n");
    out.push_str(&format!("Total tasks: {}\n", records.len()));
    out.push_str(&format!("Completed: {}\n", state.completed_tasks.len()));
    out.push_str(&format!("Pointer: {}\n\n", state.index));
    for record in records {
        let status = if state.completed_tasks.contains(&record.index) {
            "done"
        } else {
            "pending"
        };
        let hash = state
            .task_hashes
            .get(&record.index)
            .map(|fp| fp.as_str().to_string())
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "{}. [{}] {} ({})\n",
            record.index,
            status,
            record.first_line(),
            hash
        ));
    }
    out
}

pub fn peek_text(step: &Step) -> String {
    match step {
        Step::Done => ALL_DONE.to_string(),
        Step::Task(record) => format!("Current task {}:\n\n{}", record.index, record.content),
    }
}

pub fn advance_text(step: &Step) -> String {
    match step {
        Step::Done => ALL_DONE.to_string(),
        Step::Task(record) => format!(
            "Task {} marked complete; moving on:\n\n{}",
            record.index, record.content
        ),
    }
}

pub fn complete_text(outcome: &MarkOutcome) -> String {
    match outcome {
        MarkOutcome::Marked {
            index,
            fingerprint,
            first_line,
        } => format!("Task {index} completed ({fingerprint}): {first_line}"),
        MarkOutcome::NoTask { index } => format!("No task at index {index}; nothing marked."),
    }
}

pub fn uncomplete_text(outcome: &UnmarkOutcome) -> String {
    match outcome {
        UnmarkOutcome::Cleared { index, first_line } => {
            format!("Task {index} marked pending again: {first_line}")
        }
        UnmarkOutcome::AlreadyPending { index } => {
            format!("Task {index} is already pending.")
        }
    }
}

pub fn start_text(info: Option<&(usize, String)>) -> String {
    match info {
        Some((index, first_line)) => format!(
            "Task {index}: {first_line}\n\nThe in-progress state is no longer tracked; \
             use complete to mark tasks done."
        ),
        None => "No task at that index.".to_string(),
    }
}

/// Batch-advance report: touched positions first, then the full annotated
/// content of each task for external consumption.
pub fn batch_text(batch: &BatchAdvance) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Prepared {} task(s); pointer now at {}/{}.\n",
        batch.touched.len(),
        batch.index,
        batch.total
    ));
    for record in &batch.tasks {
        out.push_str(&format!("- [{}] {}\n", record.index, record.first_line()));
    }
    out.push('\n');
    for record in &batch.tasks {
        out.push_str(&format!(
            "## Task {}\n\n{}\n\n",
            record.index, record.content
        ));
    }
    out
}
