//! Ideal-action matcher.
//!
//! An order matches an ideal action when enough of the action's keywords
//! appear in it, or when the order reads close enough to the action's
//! keyword list. Among eligible actions the highest similarity wins, and
//! ties go to the action that appears first in the scenario document.

use dynasty_types::{IdealAction, IdealActionSet};
use tracing::debug;

use crate::config::MatcherConfig;
use crate::similarity::gestalt_ratio;

/// Characters of the summary shown in the match log line.
const LOG_SUMMARY_CHARS: usize = 60;

/// A successful match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealMatch<'a> {
    /// Name of the matched action in the ideal-action set.
    pub name: &'a str,
    /// The matched action.
    pub action: &'a IdealAction,
    /// Similarity between the order and the action's keyword list.
    pub ratio: f64,
    /// Keywords found in the order.
    pub keyword_hits: usize,
}

/// Find the best ideal action for `order`, if any is eligible.
///
/// The order is lower-cased and trimmed. For each action, `keyword_hits`
/// counts its non-empty keywords occurring in the order and `ratio` is the
/// [`gestalt_ratio`] against the space-joined keywords. An action is
/// eligible when `keyword_hits >= min_keyword_hits` or
/// `ratio > similarity_threshold`.
pub fn find_ideal_match<'a>(
    order: &str,
    actions: &'a IdealActionSet,
    config: &MatcherConfig,
) -> Option<IdealMatch<'a>> {
    let normalized = order.trim().to_lowercase();
    let mut best: Option<IdealMatch<'a>> = None;

    for (name, action) in actions.iter() {
        let keywords: Vec<String> = action
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let keyword_hits = keywords
            .iter()
            .filter(|k| normalized.contains(k.as_str()))
            .count();
        let ratio = gestalt_ratio(&normalized, &keywords.join(" "));

        let eligible =
            keyword_hits >= config.min_keyword_hits || ratio > config.similarity_threshold;
        if !eligible {
            continue;
        }
        if best.is_none_or(|current| ratio > current.ratio) {
            best = Some(IdealMatch {
                name: name.as_str(),
                action,
                ratio,
                keyword_hits,
            });
        }
    }

    if let Some(found) = &best {
        let preview: String = found.action.summary.chars().take(LOG_SUMMARY_CHARS).collect();
        debug!(
            action = found.name,
            ratio = found.ratio,
            keyword_hits = found.keyword_hits,
            summary = %preview,
            "ideal action matched"
        );
    }

    best
}
