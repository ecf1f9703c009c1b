//! Error types for the `dynasty-content` crate.

use std::path::PathBuf;

/// Errors that can occur while loading content documents.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The document could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The document path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// The document path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
