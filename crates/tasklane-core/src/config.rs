use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Optional per-root overrides for the workspace file names. All fields are
/// relative to the `.tasklane` directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasklaneConfig {
    pub task_file: Option<String>,
    pub state_file: Option<String>,
    pub rules_file: Option<String>,
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(".tasklane.toml")
}

/// Best-effort config load: a missing or malformed config file is simply
/// ignored and defaults apply.
pub fn load_config(root: &Path) -> Option<TasklaneConfig> {
    let path = config_path(root);
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(&path).ok()?;
    toml::from_str::<TasklaneConfig>(&text).ok()
}
