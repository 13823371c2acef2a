//! Numeric disambiguation.
//!
//! Text metrics score `Su-30` and `Su-25`, or `29th Awards` and `30th
//! Awards`, as near-identical. [`adjust`] turns a textual score into a signal
//! that says whether the numbers embedded in the two strings agree.

/// Default textual similarity above which numbers are compared.
pub const DEFAULT_ORDINAL_THRESHOLD: f64 = 0.7;

/// Returned when numbers cannot tell the strings apart either way.
pub const NEUTRAL_SCORE: f64 = 0.4;

/// Maximal runs of ASCII digits in `text`, in order of appearance.
///
/// Fullwidth and other compatibility digits are folded to ASCII by NFKC
/// upstream, so only ASCII needs handling here.
pub fn digit_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_ascii_digit() {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(begin) = start.take() {
            runs.push(&text[begin..idx]);
        }
    }
    if let Some(begin) = start {
        runs.push(&text[begin..]);
    }

    runs
}

/// Ordinal adjustment of a similarity score.
///
/// - `sim < threshold`: [`NEUTRAL_SCORE`].
/// - same digit runs in both strings (including none at all): `1.0`.
/// - digits on one side only: [`NEUTRAL_SCORE`].
/// - different digits on both sides: `0.0`.
pub fn adjust(s1: &str, s2: &str, sim: f64, threshold: f64) -> f64 {
    if sim < threshold {
        return NEUTRAL_SCORE;
    }

    let left = digit_runs(s1);
    let right = digit_runs(s2);
    if left == right {
        1.0
    } else if left.is_empty() || right.is_empty() {
        NEUTRAL_SCORE
    } else {
        0.0
    }
}
