use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parse::{load_tasks, TaskFileError};
use crate::state::{save_state, PersistedState, StateError};
use crate::workspace::WorkspacePaths;

pub const DEFAULT_TASKS: &str = "\
# Write your tasks here
# Separate tasks with a blank line

Write your first task
";

pub const DEFAULT_RULES: &str = "\
# Shared rules applied to every task
# e.g. coding guidelines or working agreements
# This file is optional
";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Project root does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("Failed to prepare workspace files: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tasks(#[from] TaskFileError),
    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Debug)]
pub struct BootstrapReport {
    pub dir: PathBuf,
    pub created_dir: bool,
    pub created_tasks: bool,
    pub created_rules: bool,
    pub created_state: bool,
    pub task_count: usize,
}

/// Prepare a workspace for serving: ensure the `.tasklane` directory and
/// seed default task/rule files when absent, then verify the task file
/// parses. A missing root is fatal here; a task file that later goes
/// missing is a per-call failure instead.
pub fn bootstrap_workspace(root: &Path) -> Result<BootstrapReport, BootstrapError> {
    if !root.exists() {
        return Err(BootstrapError::MissingRoot(root.to_path_buf()));
    }
    let paths = WorkspacePaths::resolve(root);

    let created_dir = !paths.dir.exists();
    if created_dir {
        fs::create_dir_all(&paths.dir)?;
    }

    let created_tasks = !paths.tasks_file.exists();
    if created_tasks {
        fs::write(&paths.tasks_file, DEFAULT_TASKS)?;
    }

    let created_rules = !paths.rules_file.exists();
    if created_rules {
        fs::write(&paths.rules_file, DEFAULT_RULES)?;
    }

    let records = load_tasks(&paths.tasks_file)?;

    let created_state = !paths.state_file.exists();
    if created_state {
        save_state(&paths.state_file, &PersistedState::default())?;
    }

    Ok(BootstrapReport {
        dir: paths.dir,
        created_dir,
        created_tasks,
        created_rules,
        created_state,
        task_count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::{DEFAULT_STATE_FILE, DEFAULT_TASK_FILE, TASKLANE_DIR};
    use tempfile::TempDir;

    #[test]
    fn bootstrap_seeds_a_fresh_workspace() {
        let temp = TempDir::new().expect("tempdir");
        let report = bootstrap_workspace(temp.path()).expect("bootstrap");
        assert!(report.created_dir);
        assert!(report.created_tasks);
        assert!(report.created_rules);
        assert!(report.created_state);
        // The seed file carries one real task behind the comment block.
        assert_eq!(report.task_count, 1);
        assert!(temp
            .path()
            .join(TASKLANE_DIR)
            .join(DEFAULT_STATE_FILE)
            .exists());
    }

    #[test]
    fn bootstrap_leaves_existing_files_alone() {
        let temp = TempDir::new().expect("tempdir");
        let dir = temp.path().join(TASKLANE_DIR);
        std::fs::create_dir_all(&dir).expect("dir");
        std::fs::write(dir.join(DEFAULT_TASK_FILE), "Keep me\n").expect("tasks");

        let report = bootstrap_workspace(temp.path()).expect("bootstrap");
        assert!(!report.created_dir);
        assert!(!report.created_tasks);
        assert_eq!(report.task_count, 1);
        let kept = std::fs::read_to_string(dir.join(DEFAULT_TASK_FILE)).expect("read");
        assert_eq!(kept, "Keep me\n");
    }

    #[test]
    fn bootstrap_fails_on_missing_root() {
        let temp = TempDir::new().expect("tempdir");
        let gone = temp.path().join("does-not-exist");
        let err = bootstrap_workspace(&gone);
        assert!(matches!(err, Err(BootstrapError::MissingRoot(_))));
    }
}
