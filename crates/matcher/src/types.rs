use index::{IndexError, KnowledgeEntry};
use serde::{Deserialize, Serialize};
use similarity::{FeatureVector, SimilarityError};
use thiserror::Error;

/// Tuning knobs for [`Linker::rank`](crate::Linker::rank).
///
/// `link` always returns the single best candidate and ignores both fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkConfig {
    /// Maximum number of hits returned by `rank`.
    #[serde(default = "LinkConfig::default_max_results")]
    pub max_results: usize,
    /// Hits scoring below this are dropped by `rank`.
    #[serde(default)]
    pub min_score: f64,
}

impl LinkConfig {
    pub(crate) fn default_max_results() -> usize {
        10
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.max_results == 0 {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(MatchError::InvalidConfig(
                "min_score must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_results: Self::default_max_results(),
            min_score: 0.0,
        }
    }
}

/// One scored candidate, borrowed from the index it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkHit<'a> {
    pub entry: &'a KnowledgeEntry,
    /// Mean of `features`.
    pub score: f64,
    /// Best value of each signal across the entry's labels.
    pub features: FeatureVector,
}

impl LinkHit<'_> {
    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

/// Errors produced by the linking layer.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid link config: {0}")]
    InvalidConfig(String),
    #[error("invalid feature config: {0}")]
    Features(#[from] SimilarityError),
    #[error("index error: {0}")]
    Index(#[from] IndexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = LinkConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_results, 10);
        assert_eq!(cfg.min_score, 0.0);
    }

    #[test]
    fn zero_max_results_rejected() {
        let cfg = LinkConfig {
            max_results: 0,
            ..LinkConfig::default()
        };
        let err = cfg.validate().expect_err("config should be invalid");
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("max_results")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_min_score_rejected() {
        for min_score in [-0.1, 1.1, f64::NAN] {
            let cfg = LinkConfig {
                min_score,
                ..LinkConfig::default()
            };
            let err = cfg.validate().expect_err("config should be invalid");
            match err {
                MatchError::InvalidConfig(msg) => assert!(msg.contains("min_score")),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: LinkConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(cfg, LinkConfig::default());
    }
}
