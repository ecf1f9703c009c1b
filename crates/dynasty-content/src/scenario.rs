//! Scenario documents: the factions, objectives, and starting clock of a
//! campaign.
//!
//! Every section is optional. Gaps are filled with defaults when the
//! document is turned into a [`CampaignSetup`].

use std::collections::BTreeMap;
use std::path::Path;

use dynasty_core::CampaignSetup;
use dynasty_core::calendar::{DEFAULT_YEAR, parse_year};
use dynasty_types::{Category, FactionProfile, ResourceState, YearValue};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ContentError;
use crate::ideal_run::SelectedBlock;

/// Faction name used when a scenario lists none.
pub const UNKNOWN_FACTION: &str = "Unknown";

/// Briefing context used when neither the scenario nor the faction has one.
pub const NO_CONTEXT: &str = "No contextual data available.";

/// Identity of the campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CampaignMeta {
    /// Key into the ideal-run document, e.g. `Sparta_380BC`.
    #[serde(default)]
    pub id: Option<String>,

    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Narrative context attached to a faction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FactionContext {
    /// Trait tags feeding the context modifier.
    #[serde(default)]
    pub traits: Vec<String>,

    /// Free-text notes, used as briefing context when the scenario has none.
    #[serde(default)]
    pub notes: Option<String>,
}

/// One faction as authored in the scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FactionEntry {
    /// Starting resources.
    #[serde(default)]
    pub resources: ResourceState,

    /// Category stats keyed by category name. Unknown names are ignored.
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,

    /// Traits and notes.
    #[serde(default)]
    pub context: FactionContext,
}

/// Clock state stored in the scenario.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveState {
    /// Current year, as a number or human notation.
    #[serde(default)]
    pub turn_year: Option<YearValue>,

    /// Current turn.
    #[serde(default)]
    pub current_turn: Option<u32>,

    /// Year the campaign started in, when saved part-way through.
    #[serde(default)]
    pub start_turn_year: Option<YearValue>,
}

/// A scenario document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScenarioDocument {
    /// Campaign identity.
    #[serde(default)]
    pub campaign_meta: CampaignMeta,

    /// Name of the player faction; defaults to the first faction listed.
    #[serde(default)]
    pub player_faction: Option<String>,

    /// Factions in document order.
    #[serde(default)]
    pub factions: IndexMap<String, FactionEntry>,

    /// Objectives shown in the briefing.
    #[serde(default)]
    pub objectives: Vec<String>,

    /// Briefing context.
    #[serde(default)]
    pub context: Option<String>,

    /// Starting clock.
    #[serde(default)]
    pub save_state: SaveState,
}

/// Load a scenario from `path`.
///
/// A missing `campaign_meta.id` is derived from the file stem.
pub fn load_scenario(path: &Path) -> Result<ScenarioDocument, ContentError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut scenario: ScenarioDocument =
        serde_json::from_str(&contents).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    if scenario.campaign_meta.id.is_none() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = campaign_id_from_stem(&stem);
        debug!(id = %id, "derived campaign id from file name");
        scenario.campaign_meta.id = Some(id);
    }

    Ok(scenario)
}

/// The first two `_`-separated parts of a file stem:
/// `Sparta_380BC_LastKing` gives `Sparta_380BC`.
pub fn campaign_id_from_stem(stem: &str) -> String {
    stem.splitn(3, '_').take(2).collect::<Vec<_>>().join("_")
}

impl ScenarioDocument {
    /// Campaign id, or an empty string when none could be derived.
    pub fn campaign_id(&self) -> &str {
        self.campaign_meta.id.as_deref().unwrap_or_default()
    }

    /// Display title, falling back to the campaign id.
    pub fn title(&self) -> &str {
        self.campaign_meta
            .title
            .as_deref()
            .unwrap_or_else(|| self.campaign_id())
    }

    /// The player faction's name and entry.
    ///
    /// `player_faction` wins when set; otherwise the first faction in
    /// document order. The entry is `None` when the name is not listed.
    pub fn player_handles(&self) -> (&str, Option<&FactionEntry>) {
        let name = self
            .player_faction
            .as_deref()
            .or_else(|| self.factions.first().map(|(name, _)| name.as_str()))
            .unwrap_or(UNKNOWN_FACTION);
        (name, self.factions.get(name))
    }

    /// What the scorer needs to know about the player faction.
    pub fn faction_profile(&self) -> FactionProfile {
        let (name, entry) = self.player_handles();
        let mut profile = FactionProfile::named(name);
        let Some(entry) = entry else {
            warn!(faction = name, "player faction not listed; using default stats");
            return profile;
        };

        for (stat, value) in &entry.stats {
            match stat.parse::<Category>() {
                Ok(category) => {
                    profile.stats.insert(category, *value);
                }
                Err(e) => debug!(error = %e, "ignoring stat"),
            }
        }
        profile.traits = entry.context.traits.iter().cloned().collect();
        profile
    }

    /// Briefing context: the scenario's, else the faction notes, else a
    /// stock line.
    pub fn briefing_context(&self) -> &str {
        self.context
            .as_deref()
            .or_else(|| {
                self.player_handles()
                    .1
                    .and_then(|entry| entry.context.notes.as_deref())
            })
            .unwrap_or(NO_CONTEXT)
    }

    /// Turn the document and the selected ideal-run block into session
    /// inputs.
    pub fn campaign_setup(&self, ideal: SelectedBlock) -> CampaignSetup {
        let resources = self
            .player_handles()
            .1
            .map(|entry| entry.resources.clone())
            .unwrap_or_default();

        let current = self
            .save_state
            .turn_year
            .as_ref()
            .map_or(DEFAULT_YEAR, parse_year);
        let (start_year, resume_year) = match &self.save_state.start_turn_year {
            Some(start) => {
                let start = parse_year(start);
                (start, (start != current).then_some(current))
            }
            None => (current, None),
        };

        CampaignSetup {
            title: self.title().to_owned(),
            faction: self.faction_profile(),
            resources,
            start_year,
            start_turn: self.save_state.current_turn.unwrap_or(1),
            resume_year,
            ideal_actions: ideal.ideal_actions,
            outcome: ideal.simulation_outcome,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use dynasty_types::resources::{GOLD, MANPOWER};

    use super::*;

    const SCENARIO: &str = r#"{
        "campaign_meta": { "title": "The Last King" },
        "factions": {
            "Sparta": {
                "resources": { "gold": 800, "manpower": 1200 },
                "stats": { "military": 18, "economy": 6, "naval": 3 },
                "context": {
                    "traits": ["land_power", "oligarchy"],
                    "notes": "The ephors are restless."
                }
            },
            "Athens": { "resources": { "gold": 2000 } }
        },
        "objectives": ["Restore the citizen body", "Contain Thebes"],
        "save_state": { "turn_year": "380 BC", "current_turn": 1 }
    }"#;

    fn parsed() -> ScenarioDocument {
        serde_json::from_str(SCENARIO).unwrap()
    }

    #[test]
    fn first_faction_is_the_player_by_default() {
        let doc = parsed();
        let (name, entry) = doc.player_handles();
        assert_eq!(name, "Sparta");
        assert_eq!(entry.unwrap().resources.get(GOLD), 800);
    }

    #[test]
    fn explicit_player_faction_wins() {
        let mut doc = parsed();
        doc.player_faction = Some("Athens".to_owned());
        assert_eq!(doc.player_handles().0, "Athens");
    }

    #[test]
    fn profile_keeps_known_stats_and_traits() {
        let profile = parsed().faction_profile();
        assert_eq!(profile.name, "Sparta");
        assert_eq!(profile.stat(Category::Military), Some(18));
        assert_eq!(profile.stats.len(), 2);
        assert!(profile.has_trait("oligarchy"));
    }

    #[test]
    fn briefing_falls_back_to_faction_notes() {
        let doc = parsed();
        assert_eq!(doc.briefing_context(), "The ephors are restless.");
        assert_eq!(ScenarioDocument::default().briefing_context(), NO_CONTEXT);
    }

    #[test]
    fn setup_parses_the_start_year() {
        let setup = parsed().campaign_setup(SelectedBlock::default());
        assert_eq!(setup.start_year, -380);
        assert_eq!(setup.resume_year, None);
        assert_eq!(setup.start_turn, 1);
        assert_eq!(setup.resources.get(MANPOWER), 1200);
        assert_eq!(setup.title, "The Last King");
    }

    #[test]
    fn saved_mid_campaign_keeps_both_years() {
        let mut doc = parsed();
        doc.save_state.turn_year = Some(YearValue::Number(-370));
        doc.save_state.start_turn_year = Some(YearValue::from("380BC"));
        doc.save_state.current_turn = Some(11);
        let setup = doc.campaign_setup(SelectedBlock::default());
        assert_eq!(setup.start_year, -380);
        assert_eq!(setup.resume_year, Some(-370));
        assert_eq!(setup.start_turn, 11);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let doc: ScenarioDocument = serde_json::from_str("{}").unwrap();
        let setup = doc.campaign_setup(SelectedBlock::default());
        assert_eq!(setup.faction.name, UNKNOWN_FACTION);
        assert_eq!(setup.start_year, DEFAULT_YEAR);
        assert!(setup.resources.is_empty());
    }

    #[test]
    fn id_derived_from_stem() {
        assert_eq!(campaign_id_from_stem("Sparta_380BC_LastKing"), "Sparta_380BC");
        assert_eq!(campaign_id_from_stem("Sparta_380BC"), "Sparta_380BC");
        assert_eq!(campaign_id_from_stem("Sparta"), "Sparta");
    }

    #[test]
    fn load_fills_missing_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sparta_380BC_LastKing.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();

        let doc = load_scenario(&path).unwrap();
        assert_eq!(doc.campaign_id(), "Sparta_380BC");
        assert_eq!(doc.objectives.len(), 2);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_scenario(&path), Err(ContentError::Json { .. })));
        assert!(matches!(
            load_scenario(&dir.path().join("absent.json")),
            Err(ContentError::Io { .. })
        ));
    }
}
