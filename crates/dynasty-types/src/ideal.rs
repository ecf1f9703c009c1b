//! Ideal actions and the narrative attached to an ideal run.
//!
//! An ideal action is a scenario-authored model order: a keyword list, a
//! prose summary, and the resource effect granted the first time a player
//! order matches it. Content supplies them; the engine only reads them.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::resources::EffectDelta;

/// A scenario-authored "model" order with a guaranteed best-case effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealAction {
    /// Words or phrases whose presence in an order signals this action.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Prose describing the outcome; also the source of the use-tracking key.
    #[serde(default)]
    pub summary: String,

    /// Resource effect granted on the first match.
    #[serde(default)]
    pub effect: EffectDelta,
}

impl IdealAction {
    /// The use-tracking key: the first `len` characters of the summary.
    ///
    /// Two actions whose summaries share this prefix are indistinguishable
    /// to the used-action set; content must keep the prefixes distinct.
    pub fn key(&self, len: usize) -> String {
        self.summary.chars().take(len).collect()
    }
}

/// Ideal actions keyed by name, in document order.
///
/// The matcher breaks ties by position, so the order read from the
/// document must survive deserialization.
pub type IdealActionSet = IndexMap<String, IdealAction>;

/// Narrative text for one report period of an ideal run.
///
/// Decade entries carry `summary`; the `final_metrics` entry carries
/// `overall_outcome`. Any other fields in the document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeNarrative {
    /// Summary of a decade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Overall verdict, present on the `final_metrics` entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_outcome: Option<String>,
}

/// Report narratives keyed by decade key (`decade_1_380_370`,
/// `final_metrics`, ...).
pub type SimulationOutcome = BTreeMap<String, OutcomeNarrative>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn key_truncates_on_characters() {
        let action = IdealAction {
            summary: "Reform the agōgē and restore the ranks of the Spartiates".to_owned(),
            ..IdealAction::default()
        };
        let key = action.key(30);
        assert_eq!(key.chars().count(), 30);
        assert!(action.summary.starts_with(&key));
    }

    #[test]
    fn short_summary_is_its_own_key() {
        let action = IdealAction {
            summary: "Short".to_owned(),
            ..IdealAction::default()
        };
        assert_eq!(action.key(30), "Short");
    }

    #[test]
    fn action_set_keeps_document_order() {
        let set: IdealActionSet = serde_json::from_str(
            r#"{"zeta": {"summary": "Z"}, "alpha": {"summary": "A"}, "mu": {}}"#,
        )
        .unwrap();
        let names: Vec<&str> = set.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mu"]);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let action: IdealAction = serde_json::from_str(r#"{"keywords":["helot","land"]}"#).unwrap();
        assert_eq!(action.keywords.len(), 2);
        assert!(action.summary.is_empty());
        assert!(action.effect.is_empty());
    }
}
