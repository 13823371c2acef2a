//! Seven-signal feature vectors and the scalar match score.

use std::collections::BTreeSet;

use canonical::{char_tokens, normalize, unique_word_tokens, word_tokens, TokenSeq};
use serde::{Deserialize, Serialize};

use crate::config::{FeatureConfig, SimilarityError};
use crate::metrics::{
    hybrid_jaccard_similarity_with, jaro_winkler_similarity, levenshtein_similarity,
    monge_elkan_similarity, symmetric_monge_elkan_similarity,
};
use crate::ordinal::adjust;

/// Number of similarity signals per comparison.
pub const FEATURE_COUNT: usize = 7;

/// Signal names in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "levenshtein",
    "jaro_winkler",
    "monge_elkan",
    "symmetric_monge_elkan",
    "hybrid_jaccard",
    "ordinal_symmetric_monge_elkan",
    "ordinal_hybrid_jaccard",
];

/// Fixed-size vector of similarity signals, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Element-wise maximum of two vectors.
    pub fn max(&self, other: &FeatureVector) -> FeatureVector {
        let mut out = self.0;
        for (slot, value) in out.iter_mut().zip(other.0.iter()) {
            *slot = slot.max(*value);
        }
        FeatureVector(out)
    }

    /// Arithmetic mean of the signals; the value used for ranking.
    pub fn score(&self) -> f64 {
        self.0.iter().sum::<f64>() / FEATURE_COUNT as f64
    }

    /// `(name, value)` pairs, handy for logging and explanations.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// A string normalized and tokenized once, ready to be compared many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    pub text: String,
    pub chars: TokenSeq<char>,
    pub words: TokenSeq<String>,
    pub unique_words: BTreeSet<String>,
}

/// Turns (query, label) pairs into [`FeatureVector`]s.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    cfg: FeatureConfig,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            cfg: FeatureConfig::default(),
        }
    }
}

impl FeatureExtractor {
    /// Build an extractor after validating `cfg`.
    pub fn new(cfg: FeatureConfig) -> Result<Self, SimilarityError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.cfg
    }

    /// Normalize and tokenize `raw` with this extractor's settings.
    pub fn prepare(&self, raw: &str) -> PreparedText {
        let text = normalize(raw, &self.cfg.canonical);
        PreparedText {
            chars: char_tokens(&text),
            words: word_tokens(&text),
            unique_words: unique_word_tokens(&text),
            text,
        }
    }

    /// Feature vector of one query against one label.
    pub fn extract(&self, query: &str, label: &str) -> FeatureVector {
        self.extract_prepared(&self.prepare(query), &self.prepare(label))
    }

    /// Feature vector of two already prepared strings.
    pub fn extract_prepared(&self, query: &PreparedText, label: &PreparedText) -> FeatureVector {
        let sme = symmetric_monge_elkan_similarity(&query.words, &label.words);
        let hybrid = hybrid_jaccard_similarity_with(
            &query.unique_words,
            &label.unique_words,
            self.cfg.hybrid_threshold,
        );
        let threshold = self.cfg.ordinal_threshold;

        FeatureVector([
            levenshtein_similarity(&query.chars, &label.chars),
            jaro_winkler_similarity(&query.chars, &label.chars),
            monge_elkan_similarity(&query.words, &label.words),
            sme,
            hybrid,
            adjust(&query.text, &label.text, sme, threshold),
            adjust(&query.text, &label.text, hybrid, threshold),
        ])
    }

    /// Combine the vectors of every label by taking the per-signal maximum.
    ///
    /// Each signal may come from a different label. With no labels at all
    /// the result is the zero vector.
    pub fn extract_labels<S: AsRef<str>>(&self, query: &PreparedText, labels: &[S]) -> FeatureVector {
        labels
            .iter()
            .map(|label| self.extract_prepared(query, &self.prepare(label.as_ref())))
            .fold(FeatureVector::default(), |best, current| best.max(&current))
    }

    /// Scalar score of `query` against a candidate's labels.
    pub fn score<S: AsRef<str>>(&self, query: &str, labels: &[S]) -> f64 {
        self.extract_labels(&self.prepare(query), labels).score()
    }
}
