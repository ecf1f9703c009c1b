//! Turn-log files on disk.
//!
//! A save file is the turn log as a pretty-printed JSON array, one object
//! per resolved order. Loading reads the whole log and resumes from its
//! last entry.

use std::path::{Path, PathBuf};

use dynasty_types::{ResumePoint, TurnLog};
use tracing::{debug, info};

use crate::error::StoreError;

/// File name of the snapshot written when a campaign concludes.
pub const FINAL_SAVE: &str = "final_save.json";

/// Write `log` to `path`, replacing any existing file.
pub fn save_log(path: &Path, log: &TurnLog) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(log).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = log.len(), "turn log saved");
    Ok(())
}

/// Read the log at `path` and derive where to resume.
pub fn load_log(path: &Path) -> Result<ResumePoint, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::Missing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let log: TurnLog = serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = log.len();
    let resume = ResumePoint::from_log(log).ok_or_else(|| StoreError::Empty(path.to_path_buf()))?;
    debug!(path = %path.display(), entries, next_turn = resume.next_turn, "turn log loaded");
    Ok(resume)
}

/// Save files for one player faction inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnLogStore {
    dir: PathBuf,
    faction: String,
}

impl TurnLogStore {
    /// A store writing into `dir` for `faction`.
    pub fn new(dir: impl Into<PathBuf>, faction: &str) -> Self {
        Self {
            dir: dir.into(),
            faction: faction.to_lowercase(),
        }
    }

    /// The faction's session file: `turn_log_<faction>.json`.
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(format!("turn_log_{}.json", self.faction))
    }

    /// The conclusion snapshot: `final_save.json`.
    pub fn final_path(&self) -> PathBuf {
        self.dir.join(FINAL_SAVE)
    }

    /// Save the session log.
    pub fn save(&self, log: &TurnLog) -> Result<PathBuf, StoreError> {
        let path = self.session_path();
        save_log(&path, log)?;
        Ok(path)
    }

    /// Save the conclusion snapshot.
    pub fn save_final(&self, log: &TurnLog) -> Result<PathBuf, StoreError> {
        let path = self.final_path();
        save_log(&path, log)?;
        Ok(path)
    }

    /// Load the session log.
    pub fn load(&self) -> Result<ResumePoint, StoreError> {
        load_log(&self.session_path())
    }
}
