use std::process::Command;

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tasklane"))
}

#[test]
fn first_run_seeds_the_workspace() {
    let repo = TempDir::new().expect("repo");

    let output = bin()
        .arg("--root")
        .arg(repo.path())
        .arg("list")
        .output()
        .expect("list");
    assert!(output.status.success());

    let dir = repo.path().join(".tasklane");
    assert!(dir.join("tasks.txt").exists());
    assert!(dir.join("rules.txt").exists());
    assert!(dir.join("state.json").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Write your first task"));
}

#[test]
fn missing_root_is_fatal() {
    let repo = TempDir::new().expect("repo");
    let gone = repo.path().join("nope");

    let output = bin()
        .arg("--root")
        .arg(&gone)
        .arg("list")
        .output()
        .expect("list");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Project root does not exist"));
}

#[test]
fn state_file_round_trips_between_runs() {
    let repo = TempDir::new().expect("repo");
    let dir = repo.path().join(".tasklane");
    std::fs::create_dir_all(&dir).expect("dir");
    std::fs::write(dir.join("tasks.txt"), "Task A\n\nTask B\n\nTask C\n").expect("tasks");

    for index in ["0", "2", "5"] {
        let output = bin()
            .arg("--root")
            .arg(repo.path())
            .arg("complete")
            .arg(index)
            .output()
            .expect("complete");
        assert!(output.status.success());
    }

    let raw = std::fs::read_to_string(dir.join("state.json")).expect("state");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let completed: Vec<u64> = value
        .get("completed_tasks")
        .and_then(|v| v.as_array())
        .expect("completed_tasks")
        .iter()
        .filter_map(|v| v.as_u64())
        .collect();
    // Index 5 clamps to the end of a 3-task list and marks nothing.
    assert_eq!(completed, vec![0, 2]);
}
