//! Order classifier: free text to [`Category`] by keyword presence.
//!
//! Keyword sets are tested in [`Category::ALL`] order (military, economy,
//! diplomacy, religion). The first set with any substring hit wins, so an
//! order mentioning both a march and a market is military.

use dynasty_types::Category;

use crate::config::ClassifierConfig;

/// Classify an order. Total and side-effect free.
pub fn classify(order: &str, config: &ClassifierConfig) -> Category {
    let text = order.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|category| {
            config
                .keywords(*category)
                .iter()
                .filter(|keyword| !keyword.is_empty())
                .any(|keyword| text.contains(&keyword.to_lowercase()))
        })
        .unwrap_or(Category::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(order: &str) -> Category {
        classify(order, &ClassifierConfig::default())
    }

    #[test]
    fn each_category_is_recognized() {
        assert_eq!(classify_default("Fortify the passes"), Category::Military);
        assert_eq!(classify_default("Open a new market"), Category::Economy);
        assert_eq!(classify_default("Send an envoy to Thebes"), Category::Diplomacy);
        assert_eq!(classify_default("Hold a festival for Apollo"), Category::Religion);
    }

    #[test]
    fn military_beats_economy() {
        assert_eq!(
            classify_default("march to the market and attack"),
            Category::Military
        );
    }

    #[test]
    fn diplomacy_beats_religion() {
        assert_eq!(
            classify_default("negotiate a treaty at the temple"),
            Category::Diplomacy
        );
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(classify_default("HONOR THE GODS"), Category::Religion);
        assert_eq!(classify_default("retrain the hoplites"), Category::Military);
    }

    #[test]
    fn unknown_and_empty_orders_are_generic() {
        assert_eq!(classify_default("build a road"), Category::Generic);
        assert_eq!(classify_default(""), Category::Generic);
    }

    #[test]
    fn empty_keywords_never_match() {
        let config = ClassifierConfig {
            military: vec![String::new()],
            ..ClassifierConfig::default()
        };
        assert_eq!(classify("build a road", &config), Category::Generic);
    }
}
