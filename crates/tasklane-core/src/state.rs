use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::Fingerprint;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The single persisted record. `index` is the next task to serve, clamped
/// into [0, N] on every read. `completed_tasks` is a positional view that
/// reconciliation re-derives from `completed_hashes`; the hash history only
/// grows and carries completion status across file edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub index: usize,
    pub completed_tasks: BTreeSet<usize>,
    pub completed_hashes: BTreeSet<Fingerprint>,
    pub task_hashes: BTreeMap<usize, Fingerprint>,
}

impl PersistedState {
    /// Clamp the pointer into [0, total] and return it.
    pub fn clamp_index(&mut self, total: usize) -> usize {
        if self.index > total {
            self.index = total;
        }
        self.index
    }
}

/// On-disk encoding. The persisted format has no set type, so set fields
/// encode as sorted lists and hash-map keys as stringified integers; the
/// conversion happens only at this boundary.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    index: usize,
    #[serde(default)]
    completed_tasks: Vec<usize>,
    #[serde(default)]
    completed_hashes: Vec<String>,
    #[serde(default)]
    task_hashes: BTreeMap<String, String>,
}

impl From<&PersistedState> for StateFile {
    fn from(state: &PersistedState) -> Self {
        StateFile {
            index: state.index,
            completed_tasks: state.completed_tasks.iter().copied().collect(),
            completed_hashes: state
                .completed_hashes
                .iter()
                .map(|hash| hash.as_str().to_string())
                .collect(),
            task_hashes: state
                .task_hashes
                .iter()
                .map(|(index, hash)| (index.to_string(), hash.as_str().to_string()))
                .collect(),
        }
    }
}

impl From<StateFile> for PersistedState {
    fn from(file: StateFile) -> Self {
        PersistedState {
            index: file.index,
            completed_tasks: file.completed_tasks.into_iter().collect(),
            completed_hashes: file
                .completed_hashes
                .into_iter()
                .map(Fingerprint::from)
                .collect(),
            task_hashes: file
                .task_hashes
                .into_iter()
                .filter_map(|(index, hash)| {
                    index.parse::<usize>().ok().map(|i| (i, Fingerprint::from(hash)))
                })
                .collect(),
        }
    }
}

/// Load the persisted state. Never fails: a missing or malformed file
/// recovers to the default `{index: 0}` state.
pub fn load_state(path: &Path) -> PersistedState {
    let Ok(raw) = fs::read_to_string(path) else {
        return PersistedState::default();
    };
    match serde_json::from_str::<StateFile>(&raw) {
        Ok(file) => file.into(),
        Err(_) => PersistedState::default(),
    }
}

pub fn save_state(path: &Path, state: &PersistedState) -> Result<(), StateError> {
    let file = StateFile::from(state);
    let raw = serde_json::to_string_pretty(&file)?;
    fs::write(path, raw).map_err(|source| StateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_state_file_loads_default() {
        let temp = TempDir::new().expect("tempdir");
        let state = load_state(&temp.path().join("state.json"));
        assert_eq!(state, PersistedState::default());
    }

    #[test]
    fn malformed_state_file_recovers_to_default() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("state.json");
        std::fs::write(&path, "{not json").expect("write");
        assert_eq!(load_state(&path), PersistedState::default());
    }

    #[test]
    fn state_round_trips_regardless_of_list_order() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("state.json");
        std::fs::write(
            &path,
            r#"{
                "index": 2,
                "completed_tasks": [5, 0, 2],
                "completed_hashes": ["beefcafe", "0badf00d"],
                "task_hashes": {"0": "beefcafe", "2": "0badf00d"}
            }"#,
        )
        .expect("write");

        let state = load_state(&path);
        assert_eq!(state.index, 2);
        assert_eq!(
            state.completed_tasks,
            [0usize, 2, 5].into_iter().collect::<BTreeSet<_>>()
        );

        save_state(&path, &state).expect("save");
        let reloaded = load_state(&path);
        assert_eq!(reloaded, state);

        save_state(&path, &reloaded).expect("save again");
        assert_eq!(load_state(&path), state);
    }

    #[test]
    fn non_numeric_hash_keys_are_dropped_on_load() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"index": 0, "task_hashes": {"0": "aaaaaaaa", "junk": "bbbbbbbb"}}"#,
        )
        .expect("write");
        let state = load_state(&path);
        assert_eq!(state.task_hashes.len(), 1);
    }

    #[test]
    fn clamp_index_pins_past_end_to_total() {
        let mut state = PersistedState {
            index: 9,
            ..PersistedState::default()
        };
        assert_eq!(state.clamp_index(3), 3);
        assert_eq!(state.clamp_index(3), 3);
    }
}
