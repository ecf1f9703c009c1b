//! Error types for the turn-log store.
//!
//! None of these are fatal to a session: the console reports them and
//! carries on with the state it already has.

use std::path::PathBuf;

/// Errors that can occur while saving or loading a turn log.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No save file exists at the path.
    #[error("no save file at {0}")]
    Missing(PathBuf),

    /// Reading or writing the file failed.
    #[error("save file I/O failed for {path}: {source}")]
    Io {
        /// The save file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid turn log, or the log could not be encoded.
    #[error("corrupted save file {path}: {source}")]
    Corrupt {
        /// The save file path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The file holds an empty log.
    #[error("save file {0} is empty")]
    Empty(PathBuf),
}
