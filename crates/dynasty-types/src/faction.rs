//! What the scorer needs to know about the player faction.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::Category;

/// The player faction's name, category stats, and traits.
///
/// Built once at session start from scenario content and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionProfile {
    /// Display name (e.g. "Sparta").
    pub name: String,

    /// Skill per category; a missing category falls back to the configured
    /// default base stat.
    #[serde(default)]
    pub stats: BTreeMap<Category, i64>,

    /// Trait tags such as `land_power` or `oligarchy`.
    #[serde(default)]
    pub traits: BTreeSet<String>,
}

impl FactionProfile {
    /// Create a profile with no stats and no traits.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The stat for `category`, if the scenario supplied one.
    pub fn stat(&self, category: Category) -> Option<i64> {
        self.stats.get(&category).copied()
    }

    /// Whether the faction carries the trait tag.
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }
}
