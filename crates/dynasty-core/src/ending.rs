//! End conditions: when a campaign concludes and what the chronicle says.
//!
//! Conditions are checked after the clock advances, in a fixed priority
//! order; the first that holds decides the ending. Collapse checks come
//! before golden-age checks, so a realm that is both broke and glorious
//! still falls.

use dynasty_types::ResourceState;
use dynasty_types::resources::{AUTHORITY, GOLD, MANPOWER, STABILITY};
use serde::{Deserialize, Serialize};

use crate::config::EndConditionConfig;

/// Why a campaign ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The turn limit was reached.
    AgeOfReform,
    /// Stability fell to the floor.
    CivilUnrest,
    /// Authority fell to the floor.
    PowerShift,
    /// Manpower ran out.
    ManpowerExhausted,
    /// Gold ran out.
    TreasuryEmpty,
    /// Stability reached the ceiling.
    GoldenAgeStability,
    /// Authority reached the ceiling.
    GoldenAgeAuthority,
    /// The player ended the session.
    Abandoned,
}

impl EndReason {
    /// Narrative line announcing the ending.
    ///
    /// `faction` names the player faction; `years` is the turn limit.
    pub fn message(self, faction: &str, years: u32) -> String {
        match self {
            Self::AgeOfReform => {
                format!("{years} years have passed. The age of reform draws to a close.")
            }
            Self::CivilUnrest => {
                format!("Civil unrest erupts. The {faction} state collapses into chaos.")
            }
            Self::PowerShift | Self::ManpowerExhausted | Self::TreasuryEmpty => {
                "Your rule crumbles. Power shifts to rival factions.".to_owned()
            }
            Self::GoldenAgeStability | Self::GoldenAgeAuthority => {
                "Your reforms succeed beyond expectation; a new golden age dawns.".to_owned()
            }
            Self::Abandoned => "The campaign is set aside.".to_owned(),
        }
    }

    /// Whether the ending is a triumph rather than a collapse or a timeout.
    pub const fn is_golden_age(self) -> bool {
        matches!(self, Self::GoldenAgeStability | Self::GoldenAgeAuthority)
    }
}

/// How and when a campaign concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    /// Why it ended.
    pub reason: EndReason,
    /// Narrative announcement.
    pub message: String,
    /// Turn the clock showed at the end.
    pub turn: u32,
    /// Year the clock showed at the end.
    pub year: i64,
}

/// First end condition that holds for `resources` at `turn`, if any.
///
/// Order: turn limit, stability floor, authority floor, manpower floor,
/// gold floor, stability ceiling, authority ceiling. Missing resources
/// read as 0.
pub fn evaluate_end_conditions(
    resources: &ResourceState,
    turn: u32,
    limits: &EndConditionConfig,
) -> Option<EndReason> {
    let checks = [
        (turn >= limits.max_turns, EndReason::AgeOfReform),
        (
            resources.get(STABILITY) <= limits.stability_floor,
            EndReason::CivilUnrest,
        ),
        (
            resources.get(AUTHORITY) <= limits.authority_floor,
            EndReason::PowerShift,
        ),
        (
            resources.get(MANPOWER) <= limits.manpower_floor,
            EndReason::ManpowerExhausted,
        ),
        (
            resources.get(GOLD) <= limits.gold_floor,
            EndReason::TreasuryEmpty,
        ),
        (
            resources.get(STABILITY) >= limits.stability_ceiling,
            EndReason::GoldenAgeStability,
        ),
        (
            resources.get(AUTHORITY) >= limits.authority_ceiling,
            EndReason::GoldenAgeAuthority,
        ),
    ];

    checks
        .into_iter()
        .find_map(|(holds, reason)| holds.then_some(reason))
}
