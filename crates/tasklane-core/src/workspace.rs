use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::load_config;
use crate::cursor::{self, Step};
use crate::parse::{load_tasks, TaskFileError, TaskRecord};
use crate::rules::{annotate, load_rules};
use crate::state::{load_state, save_state, PersistedState, StateError};
use crate::status::{self, BatchAdvance, MarkOutcome, StatusError, UnmarkOutcome};
use crate::sync;

pub const TASKLANE_DIR: &str = ".tasklane";
pub const DEFAULT_TASK_FILE: &str = "tasks.txt";
pub const DEFAULT_STATE_FILE: &str = "state.json";
pub const DEFAULT_RULES_FILE: &str = "rules.txt";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Tasks(#[from] TaskFileError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Status(#[from] StatusError),
}

#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub tasks_file: PathBuf,
    pub state_file: PathBuf,
    pub rules_file: PathBuf,
}

impl WorkspacePaths {
    /// Resolve the file layout under `<root>/.tasklane/`, applying any
    /// `.tasklane.toml` file-name overrides.
    pub fn resolve(root: &Path) -> WorkspacePaths {
        let config = load_config(root).unwrap_or_default();
        let dir = root.join(TASKLANE_DIR);
        let file = |name: Option<String>, default: &str| {
            dir.join(name.as_deref().unwrap_or(default))
        };
        WorkspacePaths {
            root: root.to_path_buf(),
            tasks_file: file(config.task_file, DEFAULT_TASK_FILE),
            state_file: file(config.state_file, DEFAULT_STATE_FILE),
            rules_file: file(config.rules_file, DEFAULT_RULES_FILE),
            dir,
        }
    }
}

/// Single-owner handle over one task file / state file pair: the in-memory
/// working copy of the persisted state plus the resolved paths. The task
/// file is re-read on every operation so external edits show up on the next
/// call; the state is loaded once and written back after every mutation.
///
/// If a save fails the error is surfaced, but the in-memory mutation stays
/// visible for the rest of the process; it just will not survive a restart.
#[derive(Debug)]
pub struct Workspace {
    paths: WorkspacePaths,
    state: PersistedState,
}

impl Workspace {
    pub fn open(root: &Path) -> Workspace {
        let paths = WorkspacePaths::resolve(root);
        let state = load_state(&paths.state_file);
        Workspace { paths, state }
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn tasks(&self) -> Result<Vec<TaskRecord>, TaskFileError> {
        load_tasks(&self.paths.tasks_file)
    }

    pub fn rules(&self) -> String {
        load_rules(&self.paths.rules_file)
    }

    pub fn annotated_tasks(&self) -> Result<Vec<TaskRecord>, TaskFileError> {
        let records = self.tasks()?;
        Ok(annotate(&records, &self.rules()))
    }

    fn persist(&self) -> Result<(), StateError> {
        save_state(&self.paths.state_file, &self.state)
    }

    pub fn peek(&mut self, with_rules: bool) -> Result<Step, WorkspaceError> {
        let records = if with_rules {
            self.annotated_tasks()?
        } else {
            self.tasks()?
        };
        Ok(cursor::peek(&mut self.state, &records))
    }

    pub fn advance(&mut self, with_rules: bool) -> Result<Step, WorkspaceError> {
        let records = if with_rules {
            self.annotated_tasks()?
        } else {
            self.tasks()?
        };
        let step = cursor::advance(&mut self.state, &records);
        if matches!(step, Step::Task(_)) {
            self.persist()?;
        }
        Ok(step)
    }

    pub fn reset(&mut self) -> Result<(), WorkspaceError> {
        cursor::reset(&mut self.state);
        self.persist()?;
        Ok(())
    }

    pub fn goto(&mut self, requested: i64) -> Result<usize, WorkspaceError> {
        let records = self.tasks()?;
        let landed = cursor::goto(&mut self.state, records.len(), requested);
        self.persist()?;
        Ok(landed)
    }

    pub fn complete(&mut self, requested: i64) -> Result<MarkOutcome, WorkspaceError> {
        let records = self.tasks()?;
        let outcome = status::complete(&mut self.state, &records, requested);
        self.persist()?;
        Ok(outcome)
    }

    pub fn uncomplete(&mut self, requested: i64) -> Result<UnmarkOutcome, WorkspaceError> {
        let records = self.tasks()?;
        let outcome = status::uncomplete(&mut self.state, &records, requested);
        if matches!(outcome, UnmarkOutcome::Cleared { .. }) {
            self.persist()?;
        }
        Ok(outcome)
    }

    pub fn reset_status(&mut self) -> Result<bool, WorkspaceError> {
        let cleared = status::reset_status(&mut self.state);
        if cleared {
            self.persist()?;
        }
        Ok(cleared)
    }

    pub fn start_info(&mut self, requested: i64) -> Result<Option<(usize, String)>, WorkspaceError> {
        let records = self.tasks()?;
        Ok(status::start_info(&mut self.state, &records, requested))
    }

    pub fn batch_advance(&mut self, count: Option<i64>) -> Result<BatchAdvance, WorkspaceError> {
        let records = self.tasks()?;
        let annotated = annotate(&records, &self.rules());
        let batch = status::batch_advance(&mut self.state, &records, &annotated, count)?;
        self.persist()?;
        Ok(batch)
    }

    /// Re-derive positional completion from the fingerprint history against
    /// the current task file, then persist. Returns the reconciled records.
    pub fn reconcile(&mut self) -> Result<Vec<TaskRecord>, WorkspaceError> {
        let records = self.tasks()?;
        sync::reconcile(&mut self.state, &records);
        self.persist()?;
        Ok(records)
    }
}
