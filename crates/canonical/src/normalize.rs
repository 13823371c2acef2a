use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::CanonicalizeConfig;

/// Normalizes a mention or label before tokenization.
///
/// Applies (in order) NFKC, lowercasing and optional punctuation stripping,
/// then collapses every whitespace run into a single ASCII space and trims
/// both ends. Never fails: whitespace-only input comes back as `""`.
pub fn normalize(input: &str, cfg: &CanonicalizeConfig) -> String {
    // Unicode normalization first, since it can change character boundaries.
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut out = String::with_capacity(normalized.len());
    let mut pending_space = false;

    for grapheme in normalized.graphemes(true) {
        // Lowercasing can expand one char into several.
        if cfg.lowercase {
            for ch in grapheme.to_lowercase().chars() {
                push_char(ch, cfg, &mut out, &mut pending_space);
            }
        } else {
            for ch in grapheme.chars() {
                push_char(ch, cfg, &mut out, &mut pending_space);
            }
        }
    }

    out
}

fn push_char(ch: char, cfg: &CanonicalizeConfig, out: &mut String, pending_space: &mut bool) {
    let is_delim = ch.is_whitespace() || (cfg.strip_punctuation && ch.is_punctuation());
    if is_delim {
        if !out.is_empty() {
            *pending_space = true;
        }
        return;
    }
    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
    out.push(ch);
}
