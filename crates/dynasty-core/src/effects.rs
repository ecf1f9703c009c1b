//! Fallback effect table, outcome phrases, and effect application.
//!
//! The table holds one row per category and one delta per band. It is
//! fixed data: lookups are pure and never depend on session state.

use dynasty_types::resources::{AUTHORITY, GOLD, LEGITIMACY, MANPOWER, STABILITY};
use dynasty_types::{Category, EffectDelta, QualityBand, ResourceState};

/// Resource delta for an order of `category` resolved at `band`.
pub fn fallback_effects(category: Category, band: QualityBand) -> EffectDelta {
    use QualityBand::{Disaster, Failure, MajorSuccess, Mixed, Success};

    let pairs: &[(&str, i64)] = match (category, band) {
        (Category::Military, MajorSuccess) => {
            &[(GOLD, -80), (MANPOWER, -40), (AUTHORITY, 4), (STABILITY, 1)]
        }
        (Category::Military, Success) => {
            &[(GOLD, -60), (MANPOWER, -80), (AUTHORITY, 2), (STABILITY, 0)]
        }
        (Category::Military, Mixed) => {
            &[(GOLD, -40), (MANPOWER, -150), (AUTHORITY, 0), (STABILITY, 0)]
        }
        (Category::Military, Failure) => {
            &[(GOLD, -30), (MANPOWER, -250), (AUTHORITY, -2), (STABILITY, -1)]
        }
        (Category::Military, Disaster) => {
            &[(GOLD, -60), (MANPOWER, -400), (AUTHORITY, -4), (STABILITY, -2)]
        }

        (Category::Economy, MajorSuccess) => {
            &[(GOLD, 200), (AUTHORITY, 2), (STABILITY, 1), (LEGITIMACY, 1)]
        }
        (Category::Economy, Success) => &[(GOLD, 120), (AUTHORITY, 1), (STABILITY, 0)],
        (Category::Economy, Mixed) => &[(GOLD, 40)],
        (Category::Economy, Failure) => &[(GOLD, -40), (AUTHORITY, -1)],
        (Category::Economy, Disaster) => &[(GOLD, -120), (AUTHORITY, -3), (STABILITY, -1)],

        (Category::Diplomacy, MajorSuccess) => &[(AUTHORITY, 4), (LEGITIMACY, 2), (STABILITY, 1)],
        (Category::Diplomacy, Success) => &[(AUTHORITY, 2), (LEGITIMACY, 1)],
        (Category::Diplomacy | Category::Generic, Mixed) => &[],
        (Category::Diplomacy, Failure) => &[(AUTHORITY, -2)],
        (Category::Diplomacy, Disaster) => &[(AUTHORITY, -4), (LEGITIMACY, -2)],

        (Category::Religion, MajorSuccess) => {
            &[(GOLD, -20), (AUTHORITY, 4), (LEGITIMACY, 2), (STABILITY, 1)]
        }
        (Category::Religion, Success) => &[(GOLD, -10), (AUTHORITY, 2), (LEGITIMACY, 1)],
        (Category::Religion, Mixed) => &[(GOLD, -10)],
        (Category::Religion, Failure) => &[(GOLD, -10), (AUTHORITY, -1)],
        (Category::Religion, Disaster) => &[(GOLD, -20), (AUTHORITY, -3), (STABILITY, -1)],

        (Category::Generic, MajorSuccess) => &[(GOLD, 40), (MANPOWER, 20), (AUTHORITY, 1)],
        (Category::Generic, Success) => &[(GOLD, 20), (MANPOWER, 10), (AUTHORITY, 1)],
        (Category::Generic, Failure) => &[(GOLD, -10), (MANPOWER, -10), (AUTHORITY, -1)],
        (Category::Generic, Disaster) => &[(GOLD, -30), (MANPOWER, -30), (AUTHORITY, -2)],
    };

    EffectDelta::from_pairs(pairs.iter().copied())
}

/// Like [`fallback_effects`], keyed by category name. Unknown names use
/// the generic row.
pub fn fallback_effects_named(category: &str, band: QualityBand) -> EffectDelta {
    let category = category.parse().unwrap_or(Category::Generic);
    fallback_effects(category, band)
}

/// Both phrase variants for a band. The first is the one reported.
pub const fn phrases(band: QualityBand) -> [&'static str; 2] {
    match band {
        QualityBand::MajorSuccess => [
            "A decisive advance; the realm takes notice.",
            "Superb execution delivers strategic advantage.",
        ],
        QualityBand::Success => [
            "The plan succeeds with manageable costs.",
            "Clear gains achieved; momentum improves.",
        ],
        QualityBand::Mixed => [
            "Mixed results; progress tempered by setbacks.",
            "Limited gains before resistance stiffens.",
        ],
        QualityBand::Failure => [
            "The operation falters; resources strained.",
            "Outcomes disappoint; opposition adapts.",
        ],
        QualityBand::Disaster => [
            "Severe reversal; morale and coffers suffer.",
            "A compounding error leads to cascading setbacks.",
        ],
    }
}

/// Outcome summary for a fallback order. The category does not change the
/// wording.
pub const fn summary_for(_category: Category, band: QualityBand) -> &'static str {
    let [first, _] = phrases(band);
    first
}

/// Apply `delta` to `resources`, creating absent resources at 0.
///
/// The only operation that changes a session's resources.
pub fn apply(resources: &mut ResourceState, delta: &EffectDelta) {
    resources.apply(delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_is_defined() {
        for category in Category::ALL {
            for band in QualityBand::DESCENDING {
                // a second lookup returns the same delta
                assert_eq!(fallback_effects(category, band), fallback_effects(category, band));
            }
        }
    }

    #[test]
    fn military_failure_row() {
        let delta = fallback_effects(Category::Military, QualityBand::Failure);
        assert_eq!(delta.get(GOLD), Some(-30));
        assert_eq!(delta.get(MANPOWER), Some(-250));
        assert_eq!(delta.get(AUTHORITY), Some(-2));
        assert_eq!(delta.get(STABILITY), Some(-1));
        assert_eq!(delta.len(), 4);
    }

    #[test]
    fn zero_entries_are_kept() {
        let delta = fallback_effects(Category::Military, QualityBand::Mixed);
        assert_eq!(delta.get(AUTHORITY), Some(0));
        assert_eq!(delta.get(LEGITIMACY), None);
    }

    #[test]
    fn mixed_diplomacy_is_empty() {
        assert!(fallback_effects(Category::Diplomacy, QualityBand::Mixed).is_empty());
        assert!(fallback_effects(Category::Generic, QualityBand::Mixed).is_empty());
    }

    #[test]
    fn unknown_category_name_uses_generic_row() {
        assert_eq!(
            fallback_effects_named("piracy", QualityBand::Success),
            fallback_effects(Category::Generic, QualityBand::Success)
        );
        assert_eq!(
            fallback_effects_named("Economy", QualityBand::Mixed),
            fallback_effects(Category::Economy, QualityBand::Mixed)
        );
    }

    #[test]
    fn summary_uses_first_phrase() {
        assert_eq!(
            summary_for(Category::Economy, QualityBand::Failure),
            "The operation falters; resources strained."
        );
        assert_eq!(
            summary_for(Category::Religion, QualityBand::MajorSuccess),
            "A decisive advance; the realm takes notice."
        );
        assert_eq!(phrases(QualityBand::Disaster).len(), 2);
    }

    #[test]
    fn apply_creates_missing_resources() {
        let mut resources = ResourceState::new();
        resources.set(GOLD, 100);
        apply(&mut resources, &fallback_effects(Category::Economy, QualityBand::MajorSuccess));
        assert_eq!(resources.get(GOLD), 300);
        assert_eq!(resources.get(LEGITIMACY), 1);
        assert!(resources.contains(STABILITY));
    }
}
