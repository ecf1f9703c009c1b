//! The turn log: an append-only record of every resolved order.
//!
//! Entries are written once, after the effect is applied and before the
//! clock advances, and are never modified afterwards. The serialized form
//! is the save-file format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::QualityBand;
use crate::resources::{EffectDelta, ResourceState};

/// One resolved order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLogEntry {
    /// Turn number the order was resolved on (1-based).
    pub turn: u32,

    /// Wall-clock time of resolution, whole seconds.
    pub timestamp: DateTime<Utc>,

    /// The order text as the player typed it.
    pub order: String,

    /// Outcome quality.
    pub band: QualityBand,

    /// Human-readable outcome.
    pub summary: String,

    /// Adjustment that was applied.
    pub delta: EffectDelta,

    /// Resource totals after the adjustment.
    pub resources_after: ResourceState,

    /// Signed year the order was resolved in (before the clock advanced).
    pub year_after: i64,
}

/// Append-only sequence of [`TurnLogEntry`] values, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnLog {
    entries: Vec<TurnLogEntry>,
}

impl TurnLog {
    /// An empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn append(&mut self, entry: TurnLogEntry) {
        self.entries.push(entry);
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&TurnLogEntry> {
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TurnLogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<TurnLogEntry>> for TurnLog {
    fn from(entries: Vec<TurnLogEntry>) -> Self {
        Self { entries }
    }
}

/// Everything a session needs to resume from a saved log.
///
/// Derived from the last entry: its resource snapshot, the turn after it,
/// and the year it was resolved in. The full log travels along so the
/// session can replace resources, clock, and log in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    /// Resource totals after the last logged turn.
    pub resources: ResourceState,
    /// The turn to resume on (`last.turn + 1`).
    pub next_turn: u32,
    /// Year the last logged turn was resolved in.
    pub last_year: i64,
    /// The loaded log.
    pub log: TurnLog,
}

impl ResumePoint {
    /// Build a resume point from a loaded log. Returns `None` for an empty
    /// log, which carries nothing to resume from.
    pub fn from_log(log: TurnLog) -> Option<Self> {
        let last = log.last()?;
        let resources = last.resources_after.clone();
        let next_turn = last.turn.saturating_add(1);
        let last_year = last.year_after;
        Some(Self {
            resources,
            next_turn,
            last_year,
            log,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::{AUTHORITY, GOLD};

    fn entry(turn: u32) -> TurnLogEntry {
        let mut resources = ResourceState::new();
        resources.set(GOLD, 990);
        TurnLogEntry {
            turn,
            timestamp: Utc::now(),
            order: "levy a modest tax".to_owned(),
            band: QualityBand::Failure,
            summary: "The operation falters; resources strained.".to_owned(),
            delta: EffectDelta::from_pairs([(GOLD, -10), (AUTHORITY, -1)]),
            resources_after: resources,
            year_after: -380,
        }
    }

    #[test]
    fn append_keeps_order() {
        let mut log = TurnLog::new();
        log.append(entry(1));
        log.append(entry(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|e| e.turn), Some(2));
        assert_eq!(log.entries().first().map(|e| e.turn), Some(1));
    }

    #[test]
    fn serialized_entry_uses_save_file_field_names() {
        let value = serde_json::to_value(entry(3)).unwrap();
        for field in [
            "turn",
            "timestamp",
            "order",
            "band",
            "summary",
            "delta",
            "resources_after",
            "year_after",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value.get("band").and_then(|b| b.as_str()), Some("failure"));
    }

    #[test]
    fn resume_point_reads_last_entry() {
        let log = TurnLog::from(vec![entry(1), entry(2)]);
        let resume = ResumePoint::from_log(log).unwrap();
        assert_eq!(resume.next_turn, 3);
        assert_eq!(resume.last_year, -380);
        assert_eq!(resume.resources.get(GOLD), 990);
        assert_eq!(resume.log.len(), 2);
    }

    #[test]
    fn empty_log_has_no_resume_point() {
        assert!(ResumePoint::from_log(TurnLog::new()).is_none());
    }

    #[test]
    fn log_serializes_as_array() {
        let log = TurnLog::from(vec![entry(1)]);
        let value = serde_json::to_value(&log).unwrap();
        assert!(value.is_array());
    }
}
