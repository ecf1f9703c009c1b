//! Raw year values as they appear in content and save documents.

use serde::{Deserialize, Serialize};

/// A year exactly as authored: either a signed integer (`-380`) or a
/// human string (`"380 BC"`, `"379AD"`, `"12"`).
///
/// Interpretation (and the fallback for junk) lives in the engine's
/// calendar module; this type only carries the raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    /// Already a signed year.
    Number(i64),
    /// Human notation to be parsed.
    Text(String),
    /// Anything else (null, float, object); always falls back to the
    /// default year.
    Other(serde_json::Value),
}

impl From<i64> for YearValue {
    fn from(year: i64) -> Self {
        Self::Number(year)
    }
}

impl From<&str> for YearValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}
