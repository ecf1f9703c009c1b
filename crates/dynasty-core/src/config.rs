//! Configuration loading and typed config structures for the campaign engine.
//!
//! Every tunable the engine uses (classifier keyword sets, matcher
//! threshold, scoring weights, band thresholds, the trait-modifier table,
//! end-condition limits, report periods, baseline resources) lives here.
//! The config is passed to [`Campaign::new`](crate::campaign::Campaign::new)
//! and never read from global state.
//!
//! The optional file is `dynasty-config.yaml`. Missing sections and fields
//! fall back to the values below.

use std::path::Path;

use dynasty_types::resources::{AUTHORITY, GOLD, LEGITIMACY, MANPOWER, STABILITY};
use dynasty_types::{Category, EffectDelta, QualityBand, ResourceState};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `dynasty-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Keyword sets for the order classifier.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Ideal-action matching parameters.
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Fallback scoring weights, thresholds, and trait modifiers.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Limits that end the campaign.
    #[serde(default)]
    pub end_conditions: EndConditionConfig,

    /// Report period layout.
    #[serde(default)]
    pub report: ReportConfig,

    /// Baseline resources filled in when a scenario omits them.
    #[serde(default)]
    pub resources: ResourceDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Keyword sets, one per non-generic category.
///
/// Keywords are matched as lower-case substrings of the order text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifierConfig {
    /// Military keywords.
    #[serde(default = "default_military_keywords")]
    pub military: Vec<String>,

    /// Economy keywords.
    #[serde(default = "default_economy_keywords")]
    pub economy: Vec<String>,

    /// Diplomacy keywords.
    #[serde(default = "default_diplomacy_keywords")]
    pub diplomacy: Vec<String>,

    /// Religion keywords.
    #[serde(default = "default_religion_keywords")]
    pub religion: Vec<String>,
}

impl ClassifierConfig {
    /// Keywords for `category`. `Generic` has none.
    pub fn keywords(&self, category: Category) -> &[String] {
        match category {
            Category::Military => &self.military,
            Category::Economy => &self.economy,
            Category::Diplomacy => &self.diplomacy,
            Category::Religion => &self.religion,
            Category::Generic => &[],
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            military: default_military_keywords(),
            economy: default_economy_keywords(),
            diplomacy: default_diplomacy_keywords(),
            religion: default_religion_keywords(),
        }
    }
}

/// Ideal-action matching parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatcherConfig {
    /// Similarity ratio an action must exceed to be eligible on its own.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Keyword hits that make an action eligible regardless of ratio.
    #[serde(default = "default_min_keyword_hits")]
    pub min_keyword_hits: usize,

    /// Characters of the summary used as the use-tracking key.
    #[serde(default = "default_key_length")]
    pub key_length: usize,

    /// Delta applied when an already-granted ideal action is matched again.
    #[serde(default = "default_repetition_delta")]
    pub repetition_delta: EffectDelta,

    /// Summary reported for a repeated ideal action.
    #[serde(default = "default_repetition_message")]
    pub repetition_message: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            min_keyword_hits: default_min_keyword_hits(),
            key_length: default_key_length(),
            repetition_delta: default_repetition_delta(),
            repetition_message: default_repetition_message(),
        }
    }
}

/// One row of the context-modifier table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraitModifier {
    /// Category the modifier applies to.
    pub category: Category,

    /// Faction trait that triggers it.
    #[serde(rename = "trait")]
    pub trait_name: String,

    /// Signed contribution to the context modifier.
    pub modifier: i64,
}

impl TraitModifier {
    fn new(category: Category, trait_name: &str, modifier: i64) -> Self {
        Self {
            category,
            trait_name: trait_name.to_owned(),
            modifier,
        }
    }
}

/// Minimum score for each band above disaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BandThresholds {
    /// Minimum score for `major_success`.
    #[serde(default = "default_major_success_threshold")]
    pub major_success: i64,

    /// Minimum score for `success`.
    #[serde(default = "default_success_threshold")]
    pub success: i64,

    /// Minimum score for `mixed`.
    #[serde(default = "default_mixed_threshold")]
    pub mixed: i64,

    /// Minimum score for `failure`.
    #[serde(default = "default_failure_threshold")]
    pub failure: i64,

    /// Minimum score for `disaster`; scores below it are still disaster.
    #[serde(default)]
    pub disaster: i64,
}

impl BandThresholds {
    /// Threshold for `band`.
    pub const fn threshold(&self, band: QualityBand) -> i64 {
        match band {
            QualityBand::MajorSuccess => self.major_success,
            QualityBand::Success => self.success,
            QualityBand::Mixed => self.mixed,
            QualityBand::Failure => self.failure,
            QualityBand::Disaster => self.disaster,
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            major_success: default_major_success_threshold(),
            success: default_success_threshold(),
            mixed: default_mixed_threshold(),
            failure: default_failure_threshold(),
            disaster: 0,
        }
    }
}

/// Fallback scoring parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoringConfig {
    /// Idea quality fed to every fallback score.
    #[serde(default = "default_idea_quality")]
    pub idea_quality: i64,

    /// Weight of the idea quality term.
    #[serde(default = "default_idea_weight")]
    pub idea_weight: i64,

    /// Weight of the faction's category stat.
    #[serde(default = "default_stat_weight")]
    pub stat_weight: i64,

    /// Weight of the context modifier.
    #[serde(default = "default_context_weight")]
    pub context_weight: i64,

    /// Stat used when the faction has none for the category.
    #[serde(default = "default_base_stat")]
    pub default_base_stat: i64,

    /// Upper clamp for the score.
    #[serde(default = "default_max_score")]
    pub max_score: i64,

    /// Band thresholds.
    #[serde(default)]
    pub thresholds: BandThresholds,

    /// The (category, trait) -> modifier table.
    #[serde(default = "default_trait_modifiers")]
    pub trait_modifiers: Vec<TraitModifier>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            idea_quality: default_idea_quality(),
            idea_weight: default_idea_weight(),
            stat_weight: default_stat_weight(),
            context_weight: default_context_weight(),
            default_base_stat: default_base_stat(),
            max_score: default_max_score(),
            thresholds: BandThresholds::default(),
            trait_modifiers: default_trait_modifiers(),
        }
    }
}

/// Resource limits that end the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EndConditionConfig {
    /// Turn at which the age of reform closes.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Stability at or below this collapses the state.
    #[serde(default = "default_stability_floor")]
    pub stability_floor: i64,

    /// Authority at or below this shifts power to rivals.
    #[serde(default = "default_authority_floor")]
    pub authority_floor: i64,

    /// Manpower at or below this ends the campaign.
    #[serde(default)]
    pub manpower_floor: i64,

    /// Gold at or below this ends the campaign.
    #[serde(default)]
    pub gold_floor: i64,

    /// Stability at or above this starts a golden age.
    #[serde(default = "default_golden_age_ceiling")]
    pub stability_ceiling: i64,

    /// Authority at or above this starts a golden age.
    #[serde(default = "default_golden_age_ceiling")]
    pub authority_ceiling: i64,
}

impl Default for EndConditionConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            stability_floor: default_stability_floor(),
            authority_floor: default_authority_floor(),
            manpower_floor: 0,
            gold_floor: 0,
            stability_ceiling: default_golden_age_ceiling(),
            authority_ceiling: default_golden_age_ceiling(),
        }
    }
}

/// Report period layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Number of decade reports before the final verdict.
    #[serde(default = "default_decades")]
    pub decades: u32,

    /// Years per report period.
    #[serde(default = "default_decade_length")]
    pub decade_length: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decades: default_decades(),
            decade_length: default_decade_length(),
        }
    }
}

/// Baseline resource values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceDefaults {
    /// Value for each baseline resource a scenario leaves out.
    #[serde(default = "default_baseline")]
    pub baseline: ResourceState,
}

impl ResourceDefaults {
    /// Fill every baseline resource `resources` is missing.
    pub fn fill(&self, resources: &mut ResourceState) {
        for (name, value) in self.baseline.iter() {
            resources.set_default(name, value);
        }
    }
}

impl Default for ResourceDefaults {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_owned()).collect()
}

fn default_military_keywords() -> Vec<String> {
    words(&["fortify", "attack", "march", "train", "garrison", "raid", "war"])
}

fn default_economy_keywords() -> Vec<String> {
    words(&["trade", "tax", "market", "mint", "harvest", "tribute", "merchant"])
}

fn default_diplomacy_keywords() -> Vec<String> {
    words(&["ally", "treaty", "envoy", "negotiate", "sanction", "peace"])
}

fn default_religion_keywords() -> Vec<String> {
    words(&[
        "temple", "priest", "festival", "edict", "faith", "religion", "church", "god",
    ])
}

const fn default_similarity_threshold() -> f64 {
    0.7
}

const fn default_min_keyword_hits() -> usize {
    2
}

const fn default_key_length() -> usize {
    30
}

fn default_repetition_delta() -> EffectDelta {
    EffectDelta::from_pairs([(AUTHORITY, -1)])
}

fn default_repetition_message() -> String {
    "Repetition breeds stagnation; the same policy yields diminishing returns.".to_owned()
}

const fn default_idea_quality() -> i64 {
    1
}

const fn default_idea_weight() -> i64 {
    35
}

const fn default_stat_weight() -> i64 {
    2
}

const fn default_context_weight() -> i64 {
    2
}

const fn default_base_stat() -> i64 {
    5
}

const fn default_max_score() -> i64 {
    100
}

const fn default_major_success_threshold() -> i64 {
    85
}

const fn default_success_threshold() -> i64 {
    70
}

const fn default_mixed_threshold() -> i64 {
    55
}

const fn default_failure_threshold() -> i64 {
    40
}

fn default_trait_modifiers() -> Vec<TraitModifier> {
    vec![
        TraitModifier::new(Category::Military, "land_power", 8),
        TraitModifier::new(Category::Military, "naval_power", -3),
        TraitModifier::new(Category::Economy, "trade_empire", 6),
        TraitModifier::new(Category::Economy, "warrior_culture", -2),
        TraitModifier::new(Category::Diplomacy, "democracy", 4),
        TraitModifier::new(Category::Diplomacy, "oligarchy", -2),
        TraitModifier::new(Category::Religion, "theocracy", 5),
    ]
}

const fn default_max_turns() -> u32 {
    40
}

const fn default_stability_floor() -> i64 {
    -5
}

const fn default_authority_floor() -> i64 {
    -10
}

const fn default_golden_age_ceiling() -> i64 {
    100
}

const fn default_decades() -> u32 {
    4
}

const fn default_decade_length() -> u32 {
    10
}

fn default_baseline() -> ResourceState {
    let mut baseline = ResourceState::new();
    baseline.set(GOLD, 1000);
    baseline.set(MANPOWER, 1000);
    baseline.set(AUTHORITY, 0);
    baseline.set(LEGITIMACY, 0);
    baseline.set(STABILITY, 0);
    baseline
}

fn default_log_level() -> String {
    "warn".to_owned()
}
