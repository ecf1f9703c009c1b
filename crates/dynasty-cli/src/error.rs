//! Error types for the console launcher.
//!
//! [`CliError`] covers the failures that stop the launcher: unreadable
//! startup documents and a broken terminal. Save and load problems during
//! play are not errors here; the session reports them and carries on.

/// Top-level error for the console launcher.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The config file could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: dynasty_core::config::ConfigError,
    },

    /// The scenario or ideal-run document could not be loaded.
    #[error("content error: {source}")]
    Content {
        /// The underlying content error.
        #[from]
        source: dynasty_content::ContentError,
    },

    /// Reading orders or writing output failed.
    #[error("console error: {source}")]
    Console {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
