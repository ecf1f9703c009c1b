//! Ideal-run ("perfect run") documents.
//!
//! The document maps a campaign id to a block of ideal actions and report
//! narratives. A block may instead nest per-faction blocks under
//! `factions`. Blocks that do not parse are skipped with a warning so one
//! bad campaign does not hide the others.

use std::collections::BTreeMap;
use std::path::Path;

use dynasty_types::{IdealActionSet, SimulationOutcome};
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::{debug, warn};

use crate::error::ContentError;

/// One campaign's (or one faction's) ideal run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IdealRunBlock {
    /// Ideal actions in document order.
    #[serde(default)]
    pub ideal_actions: IdealActionSet,

    /// Report narratives keyed by decade.
    #[serde(default)]
    pub simulation_outcome: SimulationOutcome,

    /// Per-faction blocks, when the run differs by faction.
    #[serde(default)]
    pub factions: Option<BTreeMap<String, IdealRunBlock>>,
}

/// The parts of a block a campaign needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedBlock {
    /// Ideal actions for the player faction.
    pub ideal_actions: IdealActionSet,
    /// Report narratives for the campaign.
    pub simulation_outcome: SimulationOutcome,
}

/// A parsed ideal-run document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdealRunDocument {
    blocks: BTreeMap<String, IdealRunBlock>,
}

/// A top-level entry: a campaign block, or anything else (notes, stray
/// values) that is skipped.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentEntry {
    Block(IdealRunBlock),
    Other(IgnoredAny),
}

impl IdealRunDocument {
    /// Parse a document from JSON text.
    ///
    /// The top level must be an object; entries that are not valid blocks
    /// are skipped. Blocks are read straight from the text so ideal actions
    /// keep their document order.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, DocumentEntry> = serde_json::from_str(json)?;
        let mut blocks = BTreeMap::new();
        for (campaign_id, entry) in raw {
            match entry {
                DocumentEntry::Block(block) => {
                    blocks.insert(campaign_id, block);
                }
                DocumentEntry::Other(_) => {
                    warn!(
                        campaign = %campaign_id,
                        "skipping entry that is not an ideal-run block"
                    );
                }
            }
        }
        Ok(Self { blocks })
    }

    /// The block for `campaign_id`, if present.
    pub fn block(&self, campaign_id: &str) -> Option<&IdealRunBlock> {
        self.blocks.get(campaign_id)
    }

    /// Number of campaigns in the document.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no campaigns.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Select the ideal actions and narratives for `faction` in
    /// `campaign_id`.
    ///
    /// With nested `factions`, the faction's block supplies the actions and
    /// its narratives win when present; the campaign block's narratives
    /// fill in otherwise. Nothing found yields an empty selection.
    pub fn select_block(&self, campaign_id: &str, faction: &str) -> SelectedBlock {
        let Some(block) = self.block(campaign_id) else {
            debug!(campaign = campaign_id, "no ideal run for campaign");
            return SelectedBlock::default();
        };

        match &block.factions {
            Some(factions) => {
                let nested = factions.get(faction);
                if nested.is_none() {
                    debug!(campaign = campaign_id, faction, "no ideal run for faction");
                }
                let ideal_actions = nested.map(|b| b.ideal_actions.clone()).unwrap_or_default();
                let simulation_outcome = nested
                    .map(|b| &b.simulation_outcome)
                    .filter(|outcome| !outcome.is_empty())
                    .unwrap_or(&block.simulation_outcome)
                    .clone();
                SelectedBlock {
                    ideal_actions,
                    simulation_outcome,
                }
            }
            None => SelectedBlock {
                ideal_actions: block.ideal_actions.clone(),
                simulation_outcome: block.simulation_outcome.clone(),
            },
        }
    }
}

/// Load an ideal-run document from `path`.
pub fn load_ideal_run(path: &Path) -> Result<IdealRunDocument, ContentError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    IdealRunDocument::parse(&contents).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dynasty_core::config::MatcherConfig;
    use dynasty_core::matcher::find_ideal_match;

    use super::*;

    const FLAT: &str = r#"{
        "Sparta_380BC": {
            "ideal_actions": {
                "helot_reform": {
                    "keywords": ["helot", "land", "reform"],
                    "summary": "Land reform eases the helot burden.",
                    "effect": { "authority": 5 }
                },
                "agoge_revival": {
                    "keywords": ["agoge", "training"],
                    "summary": "The agoge is restored.",
                    "effect": { "manpower": 200 }
                }
            },
            "simulation_outcome": {
                "decade_1_380_370": { "summary": "Reform takes root." },
                "final_metrics": { "overall_outcome": "Sparta endures." }
            }
        },
        "_notes": "free text is skipped"
    }"#;

    const NESTED: &str = r#"{
        "Greece_404BC": {
            "simulation_outcome": { "final_metrics": { "overall_outcome": "Hellas endures." } },
            "factions": {
                "Athens": {
                    "ideal_actions": {
                        "long_walls": {
                            "keywords": ["walls"],
                            "summary": "Rebuild the walls.",
                            "effect": {}
                        }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn flat_block_keeps_document_order() {
        let doc = IdealRunDocument::parse(FLAT).unwrap();
        assert_eq!(doc.len(), 1);
        let selected = doc.select_block("Sparta_380BC", "Sparta");
        let names: Vec<&str> = selected.ideal_actions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["helot_reform", "agoge_revival"]);
        assert_eq!(selected.simulation_outcome.len(), 2);
    }

    #[test]
    fn tied_actions_resolve_to_the_first_listed() {
        let doc = IdealRunDocument::parse(
            r#"{
                "Greece_404BC": {
                    "ideal_actions": {
                        "zeta": { "keywords": ["war", "peace"], "summary": "Zeta first." },
                        "alpha": { "keywords": ["war", "peace"], "summary": "Alpha second." }
                    }
                }
            }"#,
        )
        .unwrap();
        let selected = doc.select_block("Greece_404BC", "Athens");
        let names: Vec<&str> = selected.ideal_actions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let found = find_ideal_match(
            "between war and peace",
            &selected.ideal_actions,
            &MatcherConfig::default(),
        );
        assert_eq!(found.map(|m| m.name), Some("zeta"));
    }

    #[test]
    fn nested_block_selects_faction() {
        let doc = IdealRunDocument::parse(NESTED).unwrap();
        let selected = doc.select_block("Greece_404BC", "Athens");
        assert_eq!(selected.ideal_actions.len(), 1);
        assert!(selected.simulation_outcome.contains_key("final_metrics"));

        let other = doc.select_block("Greece_404BC", "Thebes");
        assert!(other.ideal_actions.is_empty());
    }

    #[test]
    fn unknown_campaign_is_empty() {
        let doc = IdealRunDocument::parse(FLAT).unwrap();
        assert_eq!(doc.select_block("Rome_264BC", "Rome"), SelectedBlock::default());
    }

    #[test]
    fn non_object_document_is_an_error() {
        assert!(IdealRunDocument::parse("[1, 2]").is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfect_run.json");
        std::fs::write(&path, FLAT).unwrap();
        let doc = load_ideal_run(&path).unwrap();
        assert!(doc.block("Sparta_380BC").is_some());
        assert!(matches!(
            load_ideal_run(&dir.path().join("missing.json")),
            Err(ContentError::Io { .. })
        ));
    }
}
