//! Campaign calendar: signed years with no year zero.
//!
//! Years are signed integers: `-380` is 380 BC and `379` is 379 AD. The
//! historical calendar has no year 0, so every step forward from `-1`
//! lands on `1`, and spans that cross from BC into AD are one year shorter
//! than plain subtraction suggests.
//!
//! # Design Principles
//!
//! - Year parsing never fails. Junk falls back to a documented default and
//!   is logged at `warn`.
//! - The turn counter and the year move together, once per resolved order.
//! - All arithmetic saturates (no silent overflow).

use dynasty_types::YearValue;
use tracing::warn;

/// Year used when a BC string or an unrecognized value cannot be read.
pub const DEFAULT_YEAR: i64 = -380;

/// Year used when an AD string's magnitude cannot be read.
pub const DEFAULT_AD_YEAR: i64 = 1;

/// Normalize an authored year to a signed integer.
///
/// Integers pass through. Strings go through [`parse_year_text`]. Any
/// other JSON value yields [`DEFAULT_YEAR`].
pub fn parse_year(value: &YearValue) -> i64 {
    match value {
        YearValue::Number(year) => *year,
        YearValue::Text(text) => parse_year_text(text),
        YearValue::Other(other) => {
            warn!(value = %other, fallback = DEFAULT_YEAR, "year is not a number or string");
            DEFAULT_YEAR
        }
    }
}

/// Parse human year notation.
///
/// Case and spaces are ignored. `"380 BC"` gives `-380`, `"379AD"` gives
/// `379`, and a bare number such as `"-12"` is taken as-is. A BC string
/// with a non-numeric magnitude gives [`DEFAULT_YEAR`], an AD string with
/// one gives [`DEFAULT_AD_YEAR`], and anything else gives [`DEFAULT_YEAR`].
pub fn parse_year_text(text: &str) -> i64 {
    let normalized: String = text
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ' ')
        .collect();

    if let Some(magnitude) = normalized.strip_suffix("BC") {
        return magnitude_of(magnitude).map_or_else(
            || {
                warn!(year = text, fallback = DEFAULT_YEAR, "unreadable BC year");
                DEFAULT_YEAR
            },
            i64::saturating_neg,
        );
    }

    if let Some(magnitude) = normalized.strip_suffix("AD") {
        return magnitude_of(magnitude).unwrap_or_else(|| {
            warn!(year = text, fallback = DEFAULT_AD_YEAR, "unreadable AD year");
            DEFAULT_AD_YEAR
        });
    }

    normalized.parse::<i64>().unwrap_or_else(|_| {
        warn!(year = text, fallback = DEFAULT_YEAR, "unreadable year");
        DEFAULT_YEAR
    })
}

/// A year magnitude: non-empty, ASCII digits only.
fn magnitude_of(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// The year after `year`, skipping year 0.
pub const fn advance_year(year: i64) -> i64 {
    match year.saturating_add(1) {
        0 => 1,
        next => next,
    }
}

/// The year `years` steps after `start`, skipping year 0.
///
/// Equivalent to applying [`advance_year`] `years` times.
pub const fn offset_year(start: i64, years: i64) -> i64 {
    let raw = start.saturating_add(years);
    if start < 0 && raw >= 0 {
        raw.saturating_add(1)
    } else {
        raw
    }
}

/// Whole years elapsed from `start` to `current`.
///
/// One year is subtracted when the span crosses from BC into AD, since
/// year 0 does not exist.
pub const fn calendar_distance(start: i64, current: i64) -> i64 {
    let raw = current.saturating_sub(start);
    if start <= -1 && current >= 1 {
        raw.saturating_sub(1)
    } else {
        raw
    }
}

/// Render a signed year as `"380 BC"` or `"379 AD"`.
pub fn display_year(year: i64) -> String {
    if year > 0 {
        format!("{year} AD")
    } else {
        format!("{} BC", year.unsigned_abs())
    }
}

/// The campaign's temporal state: turn counter, current year, start year.
///
/// The current year is never 0. The start year is fixed at construction
/// and used for report periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignClock {
    /// Current turn number (1-based).
    turn: u32,

    /// Current signed year.
    year: i64,

    /// Year the campaign started in.
    start_year: i64,
}

impl CampaignClock {
    /// Create a clock at `turn` in `start_year`.
    ///
    /// A start year of 0 is read as 1 AD, and a turn of 0 as turn 1.
    pub const fn new(start_year: i64, turn: u32) -> Self {
        let start_year = if start_year == 0 { 1 } else { start_year };
        let turn = if turn == 0 { 1 } else { turn };
        Self {
            turn,
            year: start_year,
            start_year,
        }
    }

    /// Current turn.
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Current year.
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Starting year.
    pub const fn start_year(&self) -> i64 {
        self.start_year
    }

    /// Advance one turn and one year.
    pub const fn advance(&mut self) {
        self.turn = self.turn.saturating_add(1);
        self.year = advance_year(self.year);
    }

    /// Years elapsed since the start, never negative.
    pub const fn elapsed_years(&self) -> i64 {
        let distance = calendar_distance(self.start_year, self.year);
        if distance < 0 { 0 } else { distance }
    }

    /// Jump to `turn` in `year`, keeping the start year.
    pub const fn restore(&mut self, turn: u32, year: i64) {
        self.turn = if turn == 0 { 1 } else { turn };
        self.year = if year == 0 { 1 } else { year };
    }
}
