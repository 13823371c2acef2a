//! Configuration for mention/label normalization.
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(!config.strip_punctuation);
//! assert!(config.lowercase);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Controls how query strings and knowledge-base labels are normalized
/// before tokenization.
///
/// The same config must be applied to both sides of a comparison, otherwise
/// an exact label can fail to score `1.0` against itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    pub version: u32,

    /// Apply Unicode NFKC before anything else. This also folds fullwidth
    /// digits to ASCII, which the ordinal adjustment relies on.
    pub normalize_unicode: bool,

    /// Treat Unicode punctuation as a word delimiter.
    ///
    /// Off by default: hyphens and dots carry meaning in labels such as
    /// `Su-30` or `NAD83(CSRS)`.
    pub strip_punctuation: bool,

    /// Apply locale-free Unicode lowercasing.
    pub lowercase: bool,
}

impl CanonicalizeConfig {
    /// Reject configurations that cannot be used.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            strip_punctuation: false,
            lowercase: true,
        }
    }
}
