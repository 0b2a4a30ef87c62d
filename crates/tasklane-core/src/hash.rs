use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-derived identity of a task: the first 8 hex chars of a SHA-256
/// digest over the trimmed task text. Two different tasks may collide; the
/// fingerprint is an identity hint, not an integrity guarantee.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub const LEN: usize = 8;

    pub fn of(content: &str) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(content.trim().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        Fingerprint(digest[..Self::LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(raw: String) -> Self {
        Fingerprint(raw)
    }
}
