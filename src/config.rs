//! YAML configuration for kblink.
//!
//! One file describes text normalization, the feature extractor, the linker
//! and where knowledge-base entries come from.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "mineral deposits"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!   strip_punctuation: false
//!
//! features:
//!   version: 1
//!   ordinal_threshold: 0.7
//!   hybrid_threshold: 0.5
//!
//! linker:
//!   max_results: 10
//!   min_score: 0.0
//!
//! source:
//!   kind: "json_dir"
//!   path: "./kb"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use canonical::CanonicalizeConfig;
use index::{EntrySource, InMemorySource, JsonDirSource};
use matcher::LinkConfig;
use serde::{Deserialize, Serialize};
use similarity::FeatureConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KbLinkConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub features: FeaturesYamlConfig,

    #[serde(default)]
    pub linker: LinkerYamlConfig,

    #[serde(default)]
    pub source: SourceYamlConfig,
}

impl KbLinkConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: KbLinkConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.features.validate()?;
        self.linker.validate()?;
        self.source.validate()?;
        Ok(())
    }

    pub fn canonical_config(&self) -> CanonicalizeConfig {
        CanonicalizeConfig {
            version: self.canonical.version,
            normalize_unicode: self.canonical.normalize_unicode,
            strip_punctuation: self.canonical.strip_punctuation,
            lowercase: self.canonical.lowercase,
        }
    }

    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig {
            version: self.features.version,
            ordinal_threshold: self.features.ordinal_threshold,
            hybrid_threshold: self.features.hybrid_threshold,
            canonical: self.canonical_config(),
        }
    }

    pub fn link_config(&self) -> LinkConfig {
        LinkConfig {
            max_results: self.linker.max_results,
            min_score: self.linker.min_score,
        }
    }

    /// Build the configured entry source.
    ///
    /// An `in_memory` source starts out empty; callers fill it themselves
    /// and hand it to [`KbLinker::new`](crate::KbLinker::new) instead.
    pub fn entry_source(&self) -> Result<Arc<dyn EntrySource>, ConfigLoadError> {
        match self.source.kind {
            SourceKind::InMemory => Ok(Arc::new(InMemorySource::new())),
            SourceKind::JsonDir => {
                let path = self
                    .source
                    .path
                    .clone()
                    .ok_or_else(|| ConfigLoadError::MissingField("source.path".into()))?;
                Ok(Arc::new(JsonDirSource::new(path)))
            }
        }
    }
}

impl Default for KbLinkConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            features: FeaturesYamlConfig::default(),
            linker: LinkerYamlConfig::default(),
            source: SourceYamlConfig::default(),
        }
    }
}

/// Text normalization YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default)]
    pub strip_punctuation: bool,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: false,
        }
    }
}

/// Feature extractor YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_ordinal_threshold")]
    pub ordinal_threshold: f64,

    #[serde(default = "default_hybrid_threshold")]
    pub hybrid_threshold: f64,
}

impl FeaturesYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "features.version must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ordinal_threshold) {
            return Err(ConfigLoadError::Validation(
                "features.ordinal_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hybrid_threshold) {
            return Err(ConfigLoadError::Validation(
                "features.hybrid_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FeaturesYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ordinal_threshold: default_ordinal_threshold(),
            hybrid_threshold: default_hybrid_threshold(),
        }
    }
}

/// Linker YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkerYamlConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default)]
    pub min_score: f64,
}

impl LinkerYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_results == 0 {
            return Err(ConfigLoadError::Validation(
                "linker.max_results must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(ConfigLoadError::Validation(
                "linker.min_score must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LinkerYamlConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            min_score: 0.0,
        }
    }
}

/// Where knowledge-base entries are loaded from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    InMemory,
    JsonDir,
}

/// Entry source YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceYamlConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Directory holding `<entity_type>.json` files; required for `json_dir`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SourceYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.kind == SourceKind::JsonDir && self.path.is_none() {
            return Err(ConfigLoadError::MissingField("source.path".to_string()));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_ordinal_threshold() -> f64 {
    similarity::DEFAULT_ORDINAL_THRESHOLD
}
fn default_hybrid_threshold() -> f64 {
    similarity::HYBRID_JACCARD_THRESHOLD
}
fn default_max_results() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
canonical:
  version: 1
  strip_punctuation: true
linker:
  max_results: 3
"#;

        let config = KbLinkConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert!(config.canonical.strip_punctuation);
        assert!(config.canonical.lowercase);
        assert_eq!(config.linker.max_results, 3);
        assert_eq!(config.features.ordinal_threshold, 0.7);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
source:
  kind: "json_dir"
  path: "/var/lib/kb"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = KbLinkConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.kind, SourceKind::JsonDir);
        assert_eq!(config.source.path, Some(PathBuf::from("/var/lib/kb")));
    }

    #[test]
    fn test_default_config() {
        let config = KbLinkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source.kind, SourceKind::InMemory);
        assert_eq!(config.feature_config(), FeatureConfig::default());
        assert_eq!(config.link_config(), LinkConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = KbLinkConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_threshold_validation() {
        let yaml = r#"
version: "1.0"
features:
  ordinal_threshold: 1.5
"#;

        let result = KbLinkConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ordinal_threshold"));
    }

    #[test]
    fn test_linker_validation() {
        let yaml = r#"
version: "1.0"
linker:
  max_results: 0
"#;

        let result = KbLinkConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("max_results"));
    }

    #[test]
    fn test_json_dir_requires_path() {
        let yaml = r#"
version: "1.0"
source:
  kind: "json_dir"
"#;

        let result = KbLinkConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::MissingField(_))));
    }

    #[test]
    fn test_conversions_carry_values() {
        let yaml = r#"
version: "1.0"
canonical:
  strip_punctuation: true
features:
  ordinal_threshold: 0.8
linker:
  max_results: 5
  min_score: 0.25
"#;

        let config = KbLinkConfig::from_yaml(yaml).unwrap();
        let features = config.feature_config();
        assert_eq!(features.ordinal_threshold, 0.8);
        assert!(features.canonical.strip_punctuation);
        assert!(features.validate().is_ok());

        let linker = config.link_config();
        assert_eq!(linker.max_results, 5);
        assert_eq!(linker.min_score, 0.25);
    }
}
