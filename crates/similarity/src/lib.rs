//! # kblink similarity layer
//!
//! Scores how well a free-text mention matches a knowledge-base label.
//!
//! ## Contract
//!
//! - Metrics consume tokens from the `canonical` crate and never fail.
//! - The API is a pure function of `(query, labels, config)`: no I/O, no
//!   clocks, no global state.
//!
//! ## Signals
//!
//! For one (query, label) pair the [`FeatureExtractor`] computes seven
//! signals, in this order:
//!
//! 1.  Levenshtein similarity over characters.
//! 2.  Jaro-Winkler similarity over characters.
//! 3.  Monge-Elkan similarity over words, query → label.
//! 4.  Symmetric Monge-Elkan similarity.
//! 5.  Hybrid Jaccard similarity over distinct words.
//! 6.  Ordinal adjustment of signal 4.
//! 7.  Ordinal adjustment of signal 5.
//!
//! The ordinal adjustment keeps `Su-30` from matching `Su-25` just because
//! the text is close. A candidate with several labels keeps, per signal, the
//! best value across its labels; the mean of the combined vector is the
//! score used for ranking.
//!
//! ## Example Usage
//!
//! ```
//! use similarity::FeatureExtractor;
//!
//! let extractor = FeatureExtractor::default();
//! let exact = extractor.score("Copper", &["copper", "Cu"]);
//! let fuzzy = extractor.score("coper", &["copper", "Cu"]);
//!
//! assert_eq!(exact, 1.0);
//! assert!(fuzzy < exact);
//! ```

mod assignment;
pub mod config;
pub mod features;
pub mod metrics;
pub mod ordinal;

pub use crate::assignment::max_weight_assignment;
pub use crate::config::{FeatureConfig, SimilarityError};
pub use crate::features::{
    FeatureExtractor, FeatureVector, PreparedText, FEATURE_COUNT, FEATURE_NAMES,
};
pub use crate::metrics::{
    hybrid_jaccard_similarity, hybrid_jaccard_similarity_with, jaro_winkler_similarity,
    levenshtein_similarity, monge_elkan_similarity, symmetric_monge_elkan_similarity,
    HYBRID_JACCARD_THRESHOLD,
};
pub use crate::ordinal::{adjust, digit_runs, DEFAULT_ORDINAL_THRESHOLD, NEUTRAL_SCORE};

/// Version of the feature set. Bump when any signal's definition changes.
pub const FEATURE_SET_VERSION: u16 = 1;
