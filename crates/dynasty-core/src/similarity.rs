//! Gestalt (Ratcliff/Obershelp) string similarity.
//!
//! The ratio is `2 * M / (|a| + |b|)`, where `M` counts the characters in
//! the matching blocks found by repeatedly taking the longest common
//! substring and recursing on the text to its left and right. Ties between
//! equally long blocks go to the one starting earliest in `a`, then in `b`.

/// Similarity of two strings in `[0.0, 1.0]`, counted in characters.
///
/// Two empty strings are identical (1.0).
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len().saturating_add(b.len());
    if total == 0 {
        return 1.0;
    }
    let matched = matching_characters(&a, &b).saturating_mul(2);
    to_f64(matched) / to_f64(total)
}

fn to_f64(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Total size of all matching blocks.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total: usize = 0;
    let mut pending: Vec<(&[char], &[char])> = vec![(a, b)];

    while let Some((left, right)) = pending.pop() {
        let (i, j, len) = longest_common_block(left, right);
        if len == 0 {
            continue;
        }
        total = total.saturating_add(len);

        let (a_head, a_rest) = left.split_at(i);
        let (b_head, b_rest) = right.split_at(j);
        let a_tail = a_rest.get(len..).unwrap_or_default();
        let b_tail = b_rest.get(len..).unwrap_or_default();

        pending.push((a_head, b_head));
        pending.push((a_tail, b_tail));
    }

    total
}

/// Longest common substring as `(start_in_a, start_in_b, length)`.
///
/// Earliest in `a` wins a tie, then earliest in `b`. Returns a zero length
/// when the slices share no character.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let width = b.len().saturating_add(1);
    // run lengths of matches ending at the previous / current row
    let mut previous = vec![0_usize; width];
    let mut current = vec![0_usize; width];
    let mut best = (0, 0, 0);

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            let run = if ca == cb {
                previous.get(j).copied().unwrap_or(0).saturating_add(1)
            } else {
                0
            };
            if let Some(slot) = current.get_mut(j.saturating_add(1)) {
                *slot = run;
            }
            if run > best.2 {
                let start_a = i.saturating_add(1).saturating_sub(run);
                let start_b = j.saturating_add(1).saturating_sub(run);
                best = (start_a, start_b, run);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn identical_strings_score_one() {
        assert!(close(gestalt_ratio("helot reform", "helot reform"), 1.0));
        assert!(close(gestalt_ratio("", ""), 1.0));
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert!(close(gestalt_ratio("abc", "xyz"), 0.0));
        assert!(close(gestalt_ratio("abc", ""), 0.0));
    }

    #[test]
    fn partial_overlap() {
        // "abcd" vs "bcde": block "bcd", M = 3, ratio = 6 / 8
        assert!(close(gestalt_ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn recursion_collects_blocks_on_both_sides() {
        // blocks "ab" and "cd" around a mismatch: M = 4, ratio = 8 / 10
        assert!(close(gestalt_ratio("abxcd", "abycd"), 0.8));
    }

    #[test]
    fn classic_ratcliff_example() {
        // WIKIMEDIA / WIKIMANIA: blocks "WIKIM" and "IA" -> M = 7
        let ratio = gestalt_ratio("WIKIMEDIA", "WIKIMANIA");
        assert!(close(ratio, 14.0 / 18.0));
    }

    #[test]
    fn reordered_words_still_overlap() {
        let forward = gestalt_ratio("free the helots", "helots free");
        let backward = gestalt_ratio("helots free", "free the helots");
        assert!(forward > 0.0 && forward < 1.0);
        assert!(backward > 0.0 && backward < 1.0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(close(gestalt_ratio("agōgē", "agōgē"), 1.0));
        assert!(close(gestalt_ratio("ō", "o"), 0.0));
    }
}
