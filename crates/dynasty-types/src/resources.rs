//! Resource state and resource deltas.
//!
//! Both types are thin newtypes over `BTreeMap<String, i64>` and serialize
//! as plain JSON objects. Iteration order is alphabetical, which keeps
//! printed totals and saved logs stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Treasury.
pub const GOLD: &str = "gold";
/// Recruitable population.
pub const MANPOWER: &str = "manpower";
/// The ruler's grip on power.
pub const AUTHORITY: &str = "authority";
/// Perceived right to rule.
pub const LEGITIMACY: &str = "legitimacy";
/// Internal order.
pub const STABILITY: &str = "stability";

/// The five resource names every campaign tracks.
pub const BASELINE: [&str; 5] = [GOLD, MANPOWER, AUTHORITY, LEGITIMACY, STABILITY];

/// A partial set of signed adjustments keyed by resource name.
///
/// Resources not mentioned are unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectDelta(BTreeMap<String, i64>);

impl EffectDelta {
    /// An empty delta (no change).
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a delta from `(resource, amount)` pairs. Later pairs for the
    /// same resource overwrite earlier ones.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(name, amount)| (name.to_owned(), amount))
                .collect(),
        )
    }

    /// Adjustment for a single resource, if the delta mentions it.
    pub fn get(&self, resource: &str) -> Option<i64> {
        self.0.get(resource).copied()
    }

    /// Whether the delta mentions no resources at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of resources mentioned.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(resource, amount)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }
}

impl From<BTreeMap<String, i64>> for EffectDelta {
    fn from(map: BTreeMap<String, i64>) -> Self {
        Self(map)
    }
}

/// The active faction's resource totals.
///
/// No bounds are enforced here; only end-condition evaluation looks at
/// the values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceState(BTreeMap<String, i64>);

impl ResourceState {
    /// An empty resource state.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Current value of a resource; absent resources read as 0.
    pub fn get(&self, resource: &str) -> i64 {
        self.0.get(resource).copied().unwrap_or(0)
    }

    /// Whether the resource has an explicit entry.
    pub fn contains(&self, resource: &str) -> bool {
        self.0.contains_key(resource)
    }

    /// Set a resource to an exact value.
    pub fn set(&mut self, resource: &str, value: i64) {
        self.0.insert(resource.to_owned(), value);
    }

    /// Insert `value` only if the resource has no entry yet.
    pub fn set_default(&mut self, resource: &str, value: i64) {
        self.0.entry(resource.to_owned()).or_insert(value);
    }

    /// Add every entry of `delta`, creating missing resources at 0.
    ///
    /// Addition saturates at the `i64` bounds.
    pub fn apply(&mut self, delta: &EffectDelta) -> &mut Self {
        for (name, amount) in delta.iter() {
            let slot = self.0.entry(name.to_owned()).or_insert(0);
            *slot = slot.saturating_add(amount);
        }
        self
    }

    /// Iterate `(resource, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of tracked resources.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no resources are tracked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, i64>> for ResourceState {
    fn from(map: BTreeMap<String, i64>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn apply_adds_and_creates_missing_keys() {
        let mut state = ResourceState::new();
        state.set(GOLD, 100);

        let delta = EffectDelta::from_pairs([(GOLD, -30), ("grain", 12)]);
        state.apply(&delta);

        assert_eq!(state.get(GOLD), 70);
        assert_eq!(state.get("grain"), 12);
        assert_eq!(state.get(MANPOWER), 0);
        assert!(!state.contains(MANPOWER));
    }

    #[test]
    fn apply_saturates_instead_of_overflowing() {
        let mut state = ResourceState::new();
        state.set(GOLD, i64::MAX - 1);
        state.apply(&EffectDelta::from_pairs([(GOLD, 10)]));
        assert_eq!(state.get(GOLD), i64::MAX);
    }

    #[test]
    fn empty_delta_leaves_state_untouched() {
        let mut state = ResourceState::new();
        state.set(STABILITY, 3);
        let before = state.clone();
        state.apply(&EffectDelta::new());
        assert_eq!(state, before);
    }

    #[test]
    fn serializes_as_plain_object() {
        let delta = EffectDelta::from_pairs([(AUTHORITY, -1)]);
        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"{"authority":-1}"#);

        let state: ResourceState = serde_json::from_str(r#"{"gold":5,"manpower":9}"#).unwrap();
        assert_eq!(state.get(MANPOWER), 9);
    }

    #[test]
    fn set_default_keeps_existing_values() {
        let mut state = ResourceState::new();
        state.set(GOLD, 5);
        state.set_default(GOLD, 1000);
        state.set_default(MANPOWER, 1000);
        assert_eq!(state.get(GOLD), 5);
        assert_eq!(state.get(MANPOWER), 1000);
    }

    #[test]
    fn sizes_count_named_resources() {
        let delta = EffectDelta::from_pairs([(GOLD, 0), (STABILITY, -1)]);
        assert_eq!(delta.len(), 2);
        assert!(!delta.is_empty());
        assert!(EffectDelta::new().is_empty());

        let mut state = ResourceState::new();
        assert!(state.is_empty());
        state.set(GOLD, 10);
        assert_eq!(state.len(), 1);
        assert!(!state.is_empty());
    }
}
