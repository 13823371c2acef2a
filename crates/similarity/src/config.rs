use canonical::{CanonicalError, CanonicalizeConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::HYBRID_JACCARD_THRESHOLD;
use crate::ordinal::DEFAULT_ORDINAL_THRESHOLD;

/// Configuration for [`FeatureExtractor`](crate::FeatureExtractor).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureConfig {
    /// Feature-set version. Must be >= 1.
    pub version: u32,
    /// Textual similarity at which numbers start to matter (features 6 and 7).
    pub ordinal_threshold: f64,
    /// Word-pair score under which hybrid Jaccard gives no partial credit.
    pub hybrid_threshold: f64,
    /// Normalization applied to both the query and every label.
    pub canonical: CanonicalizeConfig,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ordinal_threshold: DEFAULT_ORDINAL_THRESHOLD,
            hybrid_threshold: HYBRID_JACCARD_THRESHOLD,
            canonical: CanonicalizeConfig::default(),
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.version == 0 {
            return Err(SimilarityError::InvalidConfigVersion {
                version: self.version,
            });
        }
        for (name, value) in [
            ("ordinal_threshold", self.ordinal_threshold),
            ("hybrid_threshold", self.hybrid_threshold),
        ] {
            // Also rejects NaN.
            if !(0.0..=1.0).contains(&value) {
                return Err(SimilarityError::InvalidThreshold { name, value });
            }
        }
        self.canonical.validate()?;
        Ok(())
    }
}

/// Errors returned when building a feature extractor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },
    #[error("invalid config: {name} must be within [0, 1] (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("invalid canonical config: {0}")]
    Canonical(#[from] CanonicalError),
}
