use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::hash::Fingerprint;

/// Blocks whose trimmed content starts with this marker are comments:
/// never counted, never indexed, never hashed.
pub const COMMENT_MARKER: char = '#';

#[derive(Debug, Error)]
pub enum TaskFileError {
    #[error("Tasks file not found: {0}")]
    NotFound(PathBuf),
    #[error("No tasks found in {0}")]
    Empty(PathBuf),
    #[error("Failed to read tasks file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One non-comment block of the task file, addressed by its position in the
/// current parse. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub index: usize,
    pub content: String,
}

impl TaskRecord {
    pub fn first_line(&self) -> &str {
        self.content.lines().next().unwrap_or("").trim()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.content)
    }
}

/// Split raw text into blank-line-delimited blocks. Lines are right-trimmed;
/// a blank line terminates the current block; a trailing block at end of
/// input is emitted as well. Each block is returned trimmed.
pub fn split_blocks(raw: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in raw.split('\n') {
        let line = line.trim_end();
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n").trim().to_string());
    }
    blocks
}

/// Parse raw text into task records. Comment blocks are dropped entirely and
/// consume no index: positions are assigned to non-comment blocks only, in
/// source order.
pub fn parse_tasks(raw: &str) -> Vec<TaskRecord> {
    split_blocks(raw)
        .into_iter()
        .filter(|block| !block.starts_with(COMMENT_MARKER))
        .enumerate()
        .map(|(index, content)| TaskRecord { index, content })
        .collect()
}

/// Read and parse the task file. The file is read fresh on every call so
/// external edits are visible on the next operation.
pub fn load_tasks(path: &Path) -> Result<Vec<TaskRecord>, TaskFileError> {
    if !path.exists() {
        return Err(TaskFileError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| TaskFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_tasks(&raw);
    if records.is_empty() {
        return Err(TaskFileError::Empty(path.to_path_buf()));
    }
    Ok(records)
}
