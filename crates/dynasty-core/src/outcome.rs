//! Deterministic outcome scoring for orders with no ideal match.
//!
//! `score = clamp(idea_quality * 35 + base_stat * 2 + context * 2, 0, 100)`
//! with the weights taken from [`ScoringConfig`]. The score then maps to a
//! [`QualityBand`] by testing the thresholds from the top down.

use dynasty_types::{Category, FactionProfile, QualityBand};

use crate::config::{BandThresholds, ScoringConfig};

/// Sum of the trait modifiers that apply to `category` for this faction.
///
/// Combinations missing from the table contribute 0.
pub fn context_modifier(
    profile: &FactionProfile,
    category: Category,
    config: &ScoringConfig,
) -> i64 {
    config
        .trait_modifiers
        .iter()
        .filter(|row| row.category == category && profile.has_trait(&row.trait_name))
        .fold(0_i64, |sum, row| sum.saturating_add(row.modifier))
}

/// Bounded fallback score for a base stat and context modifier.
pub fn quality_score(base_stat: i64, context: i64, config: &ScoringConfig) -> i64 {
    let raw = config
        .idea_quality
        .saturating_mul(config.idea_weight)
        .saturating_add(base_stat.saturating_mul(config.stat_weight))
        .saturating_add(context.saturating_mul(config.context_weight));
    raw.clamp(0, config.max_score.max(0))
}

/// The band a score falls in. Scores below every threshold are disaster.
pub fn quality_band(score: i64, thresholds: &BandThresholds) -> QualityBand {
    QualityBand::DESCENDING
        .into_iter()
        .find(|band| score >= thresholds.threshold(*band))
        .unwrap_or(QualityBand::Disaster)
}

/// A scored fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Faction stat used (or the configured default).
    pub base_stat: i64,
    /// Context modifier from traits.
    pub context: i64,
    /// Clamped score.
    pub score: i64,
    /// Resulting band.
    pub band: QualityBand,
}

/// Score an order of `category` for the faction.
pub fn assess(profile: &FactionProfile, category: Category, config: &ScoringConfig) -> Assessment {
    let base_stat = profile.stat(category).unwrap_or(config.default_base_stat);
    let context = context_modifier(profile, category, config);
    let score = quality_score(base_stat, context, config);
    Assessment {
        base_stat,
        context,
        score,
        band: quality_band(score, &config.thresholds),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn spartan() -> FactionProfile {
        let mut profile = FactionProfile::named("Sparta");
        profile.stats.insert(Category::Military, 18);
        profile.stats.insert(Category::Economy, 6);
        for t in ["land_power", "oligarchy", "warrior_culture"] {
            profile.traits.insert(t.to_owned());
        }
        profile
    }

    #[test]
    fn modifiers_sum_per_category() {
        let config = ScoringConfig::default();
        let profile = spartan();
        assert_eq!(context_modifier(&profile, Category::Military, &config), 8);
        assert_eq!(context_modifier(&profile, Category::Economy, &config), -2);
        assert_eq!(context_modifier(&profile, Category::Diplomacy, &config), -2);
        assert_eq!(context_modifier(&profile, Category::Religion, &config), 0);
        assert_eq!(context_modifier(&profile, Category::Generic, &config), 0);
    }

    #[test]
    fn score_formula_and_clamp() {
        let config = ScoringConfig::default();
        assert_eq!(quality_score(5, 0, &config), 45);
        assert_eq!(quality_score(18, 8, &config), 87);
        assert_eq!(quality_score(60, 0, &config), 100);
        assert_eq!(quality_score(-40, 0, &config), 0);
    }

    #[test]
    fn band_thresholds() {
        let t = BandThresholds::default();
        assert_eq!(quality_band(100, &t), QualityBand::MajorSuccess);
        assert_eq!(quality_band(85, &t), QualityBand::MajorSuccess);
        assert_eq!(quality_band(84, &t), QualityBand::Success);
        assert_eq!(quality_band(70, &t), QualityBand::Success);
        assert_eq!(quality_band(55, &t), QualityBand::Mixed);
        assert_eq!(quality_band(45, &t), QualityBand::Failure);
        assert_eq!(quality_band(39, &t), QualityBand::Disaster);
        assert_eq!(quality_band(-3, &t), QualityBand::Disaster);
    }

    #[test]
    fn assess_uses_default_stat_when_missing() {
        let config = ScoringConfig::default();
        let profile = FactionProfile::named("Nobody");
        let assessment = assess(&profile, Category::Generic, &config);
        assert_eq!(assessment.base_stat, 5);
        assert_eq!(assessment.score, 45);
        assert_eq!(assessment.band, QualityBand::Failure);
    }

    #[test]
    fn assess_strong_military() {
        let config = ScoringConfig::default();
        let assessment = assess(&spartan(), Category::Military, &config);
        assert_eq!(assessment.score, 87);
        assert_eq!(assessment.band, QualityBand::MajorSuccess);
    }

    proptest! {
        #[test]
        fn prop_band_is_monotonic(a in -50..150i64, b in -50..150i64) {
            let t = BandThresholds::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(quality_band(low, &t) <= quality_band(high, &t));
        }

        #[test]
        fn prop_score_stays_in_bounds(stat in -1000..1000i64, context in -1000..1000i64) {
            let score = quality_score(stat, context, &ScoringConfig::default());
            prop_assert!((0..=100).contains(&score));
        }
    }
}
