//! Workspace umbrella crate for kblink, a knowledge-base entity linker.
//!
//! This crate stitches the index registry and the linker together so callers
//! can resolve a free-text mention with a single call:
//!
//! ```
//! use std::sync::Arc;
//! use kblink::{Constraints, InMemorySource, KbLinker, KnowledgeEntry};
//!
//! let source = InMemorySource::new().with_entries(
//!     "commodity",
//!     vec![
//!         KnowledgeEntry::new("c:cu", ["Copper", "Cu"]),
//!         KnowledgeEntry::new("c:au", ["Gold", "Au"]),
//!     ],
//! );
//! let linker = KbLinker::with_defaults(Arc::new(source));
//!
//! let (id, score) = linker.link("commodity", "gold", &Constraints::new()).unwrap().unwrap();
//! assert_eq!(id, "c:au");
//! assert_eq!(score, 1.0);
//! ```

pub mod config;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

pub use canonical::{
    CanonicalError, CanonicalizeConfig, TokenSeq, char_tokens, normalize, unique_word_tokens,
    word_tokens,
};
pub use config::{ConfigLoadError, KbLinkConfig, SourceKind};
pub use index::{
    Constraints, EntrySource, InMemorySource, IndexError, IndexRegistry, JsonDirSource,
    KnowledgeBaseIndex, KnowledgeEntry, entity_types,
};
pub use matcher::{LinkConfig, LinkHit, LinkMetrics, Linker, MatchError, set_link_metrics};
pub use similarity::{
    FeatureConfig, FeatureExtractor, FeatureVector, SimilarityError, adjust,
    hybrid_jaccard_similarity, jaro_winkler_similarity, levenshtein_similarity,
    monge_elkan_similarity, symmetric_monge_elkan_similarity,
};

/// Errors surfaced by [`KbLinker`].
#[derive(Debug, Error)]
pub enum KbLinkError {
    #[error("index error: {0}")]
    Index(#[from] IndexError),
    #[error("match error: {0}")]
    Match(#[from] MatchError),
    #[error("config error: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Index registry plus linker behind one handle.
///
/// Indexes are built lazily, once per entity type, and shared between
/// threads; a `KbLinker` is usually created at startup and passed around by
/// `Arc`.
#[derive(Debug)]
pub struct KbLinker {
    registry: IndexRegistry,
    linker: Linker,
}

impl KbLinker {
    pub fn new(source: Arc<dyn EntrySource>, linker: Linker) -> Self {
        Self {
            registry: IndexRegistry::new(source),
            linker,
        }
    }

    /// Default feature and link settings over `source`.
    pub fn with_defaults(source: Arc<dyn EntrySource>) -> Self {
        Self::new(source, Linker::default())
    }

    /// Build from a loaded configuration, using its configured entry source.
    pub fn from_config(cfg: &KbLinkConfig) -> Result<Self, KbLinkError> {
        let source = cfg.entry_source()?;
        Self::from_config_with_source(cfg, source)
    }

    /// Build from a configuration but read entries from `source`.
    pub fn from_config_with_source(
        cfg: &KbLinkConfig,
        source: Arc<dyn EntrySource>,
    ) -> Result<Self, KbLinkError> {
        cfg.validate()?;
        let linker = Linker::from_configs(cfg.feature_config(), cfg.link_config())?;
        debug!(
            config = cfg.name.as_deref().unwrap_or("unnamed"),
            source = ?cfg.source.kind,
            "linker configured"
        );
        Ok(Self::new(source, linker))
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    /// The index for `name`, building it on first use.
    pub fn get_index(&self, name: &str) -> Result<Arc<KnowledgeBaseIndex>, KbLinkError> {
        Ok(self.registry.get_index(name)?)
    }

    /// `(id, score)` of the best entry of `name` for `query`.
    ///
    /// `Ok(None)` means no entry satisfies `constraints`; only a failed index
    /// build is an error.
    pub fn link(
        &self,
        name: &str,
        query: &str,
        constraints: &Constraints,
    ) -> Result<Option<(String, f64)>, KbLinkError> {
        let index = self.get_index(name)?;
        Ok(self
            .linker
            .link(&index, query, constraints)
            .map(|hit| (hit.entry.id.clone(), hit.score)))
    }

    /// Ranked `(id, score)` pairs, best first, per the linker's config.
    pub fn rank(
        &self,
        name: &str,
        query: &str,
        constraints: &Constraints,
    ) -> Result<Vec<(String, f64)>, KbLinkError> {
        let index = self.get_index(name)?;
        Ok(self
            .linker
            .rank(&index, query, constraints)
            .into_iter()
            .map(|hit| (hit.entry.id.clone(), hit.score))
            .collect())
    }
}
