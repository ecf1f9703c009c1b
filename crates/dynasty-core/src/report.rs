//! Progress reports keyed by decade.
//!
//! The ideal-run document carries one narrative per decade of the campaign
//! (`decade_1_380_370`, `decade_2_370_360`, ...) and a closing verdict
//! under `final_metrics`. A report looks up the entry for the decade the
//! clock is in, falling back to the verdict and then to a stock line.

use std::fmt;

use dynasty_types::SimulationOutcome;

use crate::calendar::{calendar_distance, offset_year};
use crate::config::ReportConfig;

/// Key of the closing verdict.
pub const FINAL_METRICS: &str = "final_metrics";

/// Text shown when an entry exists but lacks its narrative field.
pub const NO_SUMMARY: &str = "No summary available.";

/// Text shown when the document has nothing for the period.
pub const NO_DATA: &str = "No data for this period.";

/// The report period the clock is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKey {
    /// A decade of the campaign.
    Decade {
        /// 1-based decade index.
        index: u32,
        /// Year magnitude at the decade's start.
        from: u64,
        /// Year magnitude at the decade's end.
        to: u64,
    },
    /// Past the last decade.
    FinalMetrics,
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decade { index, from, to } => write!(f, "decade_{index}_{from}_{to}"),
            Self::FinalMetrics => f.write_str(FINAL_METRICS),
        }
    }
}

/// Report period for a campaign that started in `start` and is now in
/// `current`.
///
/// `index = elapsed / decade_length + 1`; past `decades` the key is
/// [`ReportKey::FinalMetrics`].
pub fn report_key(start: i64, current: i64, config: &ReportConfig) -> ReportKey {
    let elapsed = calendar_distance(start, current).max(0);
    let length = i64::from(config.decade_length.max(1));
    let index = elapsed.checked_div(length).unwrap_or(0).saturating_add(1);

    let Ok(index) = u32::try_from(index) else {
        return ReportKey::FinalMetrics;
    };
    if index > config.decades {
        return ReportKey::FinalMetrics;
    }

    let decade_start = i64::from(index.saturating_sub(1)).saturating_mul(length);
    let decade_end = i64::from(index).saturating_mul(length);
    ReportKey::Decade {
        index,
        from: offset_year(start, decade_start).unsigned_abs(),
        to: offset_year(start, decade_end).unsigned_abs(),
    }
}

/// Where a report's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// The requested decade entry.
    Decade(ReportKey),
    /// The closing verdict, requested or as a fallback.
    FinalMetrics,
    /// Nothing usable in the document.
    Missing,
}

/// A resolved report narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportNarrative {
    /// Which entry supplied the text.
    pub source: ReportSource,
    /// The narrative line.
    pub text: String,
}

/// Look up the narrative for `key`.
///
/// A decade entry yields its `summary`, the `final_metrics` entry its
/// `overall_outcome`. A missing decade falls back to `final_metrics`; if
/// that is missing too the text is [`NO_DATA`].
pub fn narrative_for(outcome: &SimulationOutcome, key: ReportKey) -> ReportNarrative {
    if matches!(key, ReportKey::Decade { .. }) {
        if let Some(entry) = outcome.get(&key.to_string()) {
            return ReportNarrative {
                source: ReportSource::Decade(key),
                text: entry.summary.clone().unwrap_or_else(|| NO_SUMMARY.to_owned()),
            };
        }
    }

    outcome.get(FINAL_METRICS).map_or_else(
        || ReportNarrative {
            source: ReportSource::Missing,
            text: NO_DATA.to_owned(),
        },
        |verdict| ReportNarrative {
            source: ReportSource::FinalMetrics,
            text: verdict
                .overall_outcome
                .clone()
                .unwrap_or_else(|| NO_SUMMARY.to_owned()),
        },
    )
}
