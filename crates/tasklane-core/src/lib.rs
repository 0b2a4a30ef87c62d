//! Core engine for tasklane: task parsing, fingerprints, and the persisted
//! pointer/completion state that survives edits to the task file.

pub mod bootstrap;
pub mod config;
pub mod cursor;
pub mod hash;
pub mod parse;
pub mod rules;
pub mod state;
pub mod status;
pub mod sync;
pub mod views;
pub mod workspace;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
