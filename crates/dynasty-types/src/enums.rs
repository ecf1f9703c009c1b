//! Enumeration types for the Imperial Dynasties campaign engine.
//!
//! Both enums serialize in `snake_case` so that turn logs and content
//! documents read `"major_success"` and `"military"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Which enum was being parsed (e.g. "category").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The topical bucket an order falls into.
///
/// Categories are derived from order text and never stored. The declaration
/// order is also the classifier's priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Armies, fortifications, raids.
    Military,
    /// Trade, taxation, harvests.
    Economy,
    /// Alliances, treaties, envoys.
    Diplomacy,
    /// Temples, priests, festivals.
    Religion,
    /// Anything the keyword sets do not recognize.
    Generic,
}

impl Category {
    /// Every category, in classifier priority order.
    pub const ALL: [Self; 5] = [
        Self::Military,
        Self::Economy,
        Self::Diplomacy,
        Self::Religion,
        Self::Generic,
    ];

    /// The `snake_case` name used in content documents and stat tables.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Military => "military",
            Self::Economy => "economy",
            Self::Diplomacy => "diplomacy",
            Self::Religion => "religion",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "military" => Ok(Self::Military),
            "economy" => Ok(Self::Economy),
            "diplomacy" => Ok(Self::Diplomacy),
            "religion" => Ok(Self::Religion),
            "generic" => Ok(Self::Generic),
            other => Err(UnknownVariant {
                kind: "category",
                value: other.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// QualityBand
// ---------------------------------------------------------------------------

/// Discretized outcome quality, worst to best.
///
/// The derived `Ord` follows declaration order, so
/// `Disaster < Failure < Mixed < Success < MajorSuccess`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    /// Severe reversal.
    Disaster,
    /// The order falters.
    Failure,
    /// Gains tempered by setbacks.
    Mixed,
    /// The order succeeds.
    Success,
    /// Decisive success; also granted by a fresh ideal action.
    MajorSuccess,
}

impl QualityBand {
    /// Every band, best first (the order thresholds are tested in).
    pub const DESCENDING: [Self; 5] = [
        Self::MajorSuccess,
        Self::Success,
        Self::Mixed,
        Self::Failure,
        Self::Disaster,
    ];

    /// The `snake_case` name used in turn logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disaster => "disaster",
            Self::Failure => "failure",
            Self::Mixed => "mixed",
            Self::Success => "success",
            Self::MajorSuccess => "major_success",
        }
    }
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityBand {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disaster" => Ok(Self::Disaster),
            "failure" => Ok(Self::Failure),
            "mixed" => Ok(Self::Mixed),
            "success" => Ok(Self::Success),
            "major_success" => Ok(Self::MajorSuccess),
            other => Err(UnknownVariant {
                kind: "quality band",
                value: other.to_owned(),
            }),
        }
    }
}
