//! Pairwise similarity metrics over tokenized strings.
//!
//! Every metric is pure, deterministic and total, returning a value in
//! `[0, 1]` where higher means more similar. Two empty inputs compare as
//! `1.0`; an empty input against a non-empty one compares as `0.0`.

use std::collections::BTreeSet;

use canonical::TokenSeq;

use crate::assignment::max_weight_assignment;

/// Token pairs scoring below this in the hybrid Jaccard metric get no
/// partial credit.
pub const HYBRID_JACCARD_THRESHOLD: f64 = 0.5;

/// `1 - edit_distance / max(len)` over character tokens.
pub fn levenshtein_similarity(a: &TokenSeq<char>, b: &TokenSeq<char>) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    let distance = strsim::generic_levenshtein(a, b);
    1.0 - distance as f64 / longest as f64
}

/// Jaro-Winkler over character tokens.
///
/// Standard constants: the prefix boost (scaling factor 0.1, at most four
/// shared leading tokens) applies once the Jaro score exceeds 0.7.
pub fn jaro_winkler_similarity(a: &TokenSeq<char>, b: &TokenSeq<char>) -> f64 {
    strsim::generic_jaro_winkler(a, b)
}

/// Character-level similarity between two single words.
fn token_similarity(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// Monge-Elkan similarity in the `a → b` direction.
///
/// For each word of `a`, take its best Jaro-Winkler score against any word of
/// `b`, then average over the words of `a`. Not symmetric.
pub fn monge_elkan_similarity(a: &TokenSeq<String>, b: &TokenSeq<String>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let total: f64 = a
        .iter()
        .map(|left| {
            b.iter()
                .map(|right| token_similarity(left, right))
                .fold(0.0_f64, f64::max)
        })
        .sum();
    total / a.len() as f64
}

/// Mean of Monge-Elkan in both directions.
pub fn symmetric_monge_elkan_similarity(a: &TokenSeq<String>, b: &TokenSeq<String>) -> f64 {
    (monge_elkan_similarity(a, b) + monge_elkan_similarity(b, a)) / 2.0
}

/// Hybrid Jaccard with the default [`HYBRID_JACCARD_THRESHOLD`].
pub fn hybrid_jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    hybrid_jaccard_similarity_with(a, b, HYBRID_JACCARD_THRESHOLD)
}

/// Set overlap where near-identical words earn partial credit.
///
/// Word pairs are scored with Jaro-Winkler, scores under `threshold` are
/// zeroed, and the smaller set is matched one-to-one against the larger set
/// so that the summed scores are maximal. The sum is divided by the size of
/// the union under that matching (every word of the larger set), so exact
/// matches reduce to classic Jaccard.
pub fn hybrid_jaccard_similarity_with(
    a: &BTreeSet<String>,
    b: &BTreeSet<String>,
    threshold: f64,
) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if small.is_empty() {
        return 0.0;
    }

    let weights: Vec<Vec<f64>> = small
        .iter()
        .map(|left| {
            large
                .iter()
                .map(|right| {
                    let score = token_similarity(left, right);
                    if score < threshold {
                        0.0
                    } else {
                        score
                    }
                })
                .collect()
        })
        .collect();

    let matched = small.len();
    let union = (small.len() + large.len() - matched) as f64;
    (max_weight_assignment(&weights) / union).clamp(0.0, 1.0)
}
