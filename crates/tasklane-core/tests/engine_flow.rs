use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tasklane_core::cursor::Step;
use tasklane_core::state::load_state;
use tasklane_core::workspace::{Workspace, DEFAULT_STATE_FILE, DEFAULT_TASK_FILE, TASKLANE_DIR};

fn seed(temp: &TempDir, tasks: &str) {
    let dir = temp.path().join(TASKLANE_DIR);
    std::fs::create_dir_all(&dir).expect("dir");
    std::fs::write(dir.join(DEFAULT_TASK_FILE), tasks).expect("tasks");
}

fn rewrite(temp: &TempDir, tasks: &str) {
    std::fs::write(
        temp.path().join(TASKLANE_DIR).join(DEFAULT_TASK_FILE),
        tasks,
    )
    .expect("rewrite");
}

#[test]
fn comment_blocks_are_invisible_to_navigation() {
    let temp = TempDir::new().expect("tempdir");
    seed(&temp, "# comment\n\nTask A\n\nTask B\n");

    let mut ws = Workspace::open(temp.path());
    let records = ws.tasks().expect("tasks");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].content, "Task A");

    let Step::Task(first) = ws.peek(false).expect("peek") else {
        panic!("expected a task");
    };
    assert_eq!(first.index, 0);
    assert_eq!(first.content, "Task A");
}

#[test]
fn walk_through_a_list_to_the_done_marker() {
    let temp = TempDir::new().expect("tempdir");
    seed(&temp, "Task A\n\nTask B\n");

    let mut ws = Workspace::open(temp.path());
    assert!(matches!(ws.advance(false).expect("advance"), Step::Task(_)));
    assert!(matches!(ws.advance(false).expect("advance"), Step::Task(_)));
    assert!(matches!(ws.advance(false).expect("advance"), Step::Done));
    assert!(matches!(ws.peek(false).expect("peek"), Step::Done));
}

#[test]
fn batch_advance_touches_the_expected_range() {
    let temp = TempDir::new().expect("tempdir");
    seed(&temp, "Task A\n\nTask B\n\nTask C\n");

    let mut ws = Workspace::open(temp.path());
    let batch = ws.batch_advance(Some(2)).expect("batch");
    assert_eq!(batch.touched, vec![0, 1]);
    assert_eq!(ws.state().index, 2);
    assert!(ws.state().completed_tasks.contains(&0));
    assert!(ws.state().completed_tasks.contains(&1));
    // Returned content carries the rule annotation.
    assert!(batch.tasks[0].content.contains("Task A"));
    assert!(batch.tasks[0].content.starts_with("# Workspace safety rules"));
}

#[test]
fn completion_follows_content_after_an_external_edit() {
    let temp = TempDir::new().expect("tempdir");
    seed(&temp, "Task A\n\nTask B\n");

    let mut ws = Workspace::open(temp.path());
    ws.complete(0).expect("complete");
    drop(ws);

    // Task A now appears at index 1; the edit happens outside the process.
    rewrite(&temp, "Task B\n\nTask A\n");

    let mut ws = Workspace::open(temp.path());
    ws.reconcile().expect("reconcile");
    assert!(ws.state().completed_tasks.contains(&1));
    assert!(!ws.state().completed_tasks.contains(&0));

    // Idempotent: a second pass changes nothing.
    let snapshot = ws.state().clone();
    ws.reconcile().expect("reconcile again");
    assert_eq!(ws.state(), &snapshot);
}

#[test]
fn goto_clamps_and_persists() {
    let temp = TempDir::new().expect("tempdir");
    seed(&temp, "Task A\n\nTask B\n\nTask C\n");

    let mut ws = Workspace::open(temp.path());
    assert_eq!(ws.goto(-5).expect("goto"), 0);
    assert_eq!(ws.goto(99).expect("goto"), 3);

    let state = load_state(
        &temp
            .path()
            .join(TASKLANE_DIR)
            .join(DEFAULT_STATE_FILE),
    );
    assert_eq!(state.index, 3);
}

#[test]
fn uncomplete_then_reconcile_remarks_unchanged_content() {
    let temp = TempDir::new().expect("tempdir");
    seed(&temp, "Task A\n\nTask B\n");

    let mut ws = Workspace::open(temp.path());
    ws.complete(0).expect("complete");
    ws.uncomplete(0).expect("uncomplete");
    assert!(ws.state().completed_tasks.is_empty());

    // The fingerprint history still knows this content; with the file
    // unchanged, reconciliation immediately re-marks it.
    ws.reconcile().expect("reconcile");
    assert!(ws.state().completed_tasks.contains(&0));
}
