//! # kblink index
//!
//! In-memory knowledge-base indexes, one per entity type, built on first use
//! and shared read-only afterwards.
//!
//! ## Core Features
//!
//! - **Pluggable sources**: entries come from an [`EntrySource`]. Out of the
//!   box there is an [`InMemorySource`] and a [`JsonDirSource`] reading
//!   `<dir>/<entity_type>.json`.
//! - **Two-phase build**: phase one loads entries and drops those without
//!   labels; phase two rewrites reference properties (a province's `country`)
//!   from a name into the referenced entry's `id`.
//! - **Compute-once registry**: [`IndexRegistry`] builds every index at most
//!   once. Concurrent requests for the same name wait on a single build.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use index::{entity_types, IndexRegistry, InMemorySource, KnowledgeEntry};
//!
//! let source = InMemorySource::new()
//!     .with_entries(entity_types::COUNTRY, vec![KnowledgeEntry::new("country:ca", ["Canada"])])
//!     .with_entries(
//!         entity_types::STATE_OR_PROVINCE,
//!         vec![KnowledgeEntry::new("prov:on", ["Ontario"]).with_property("country", "Canada")],
//!     );
//! let registry = IndexRegistry::new(Arc::new(source));
//!
//! let provinces = registry.get_index(entity_types::STATE_OR_PROVINCE).unwrap();
//! assert_eq!(provinces.get("prov:on").unwrap().property("country"), Some("country:ca"));
//! ```

mod entry;
mod registry;
pub mod resolve;
mod source;

use hashbrown::HashMap;
use thiserror::Error;
use tracing::warn;

pub use entry::{Constraints, KnowledgeEntry};
pub use registry::IndexRegistry;
pub use resolve::{first_label_lookup, reference_rule, resolve_references, ReferenceRule};
pub use source::{EntrySource, InMemorySource, JsonDirSource};

/// Entity-type names known to the knowledge base.
pub mod entity_types {
    pub const CRS: &str = "crs";
    pub const COUNTRY: &str = "country";
    pub const STATE_OR_PROVINCE: &str = "state_or_province";
    pub const COMMODITY: &str = "commodity";
    pub const UNIT: &str = "unit";
    pub const MATERIAL_FORM: &str = "material_form";
    pub const CATEGORY: &str = "category";

    pub const ALL: [&str; 7] = [
        CRS,
        COUNTRY,
        STATE_OR_PROVINCE,
        COMMODITY,
        UNIT,
        MATERIAL_FORM,
        CATEGORY,
    ];
}

/// Errors raised while loading or building an index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error(
        "{entity_type} entry {entry_id}: {property} '{value}' does not name any {target} entry"
    )]
    MissingReference {
        entity_type: String,
        entry_id: String,
        property: String,
        value: String,
        target: String,
    },
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),
    #[error("source error: {0}")]
    Source(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl IndexError {
    pub fn source_error<E: std::fmt::Display>(err: E) -> Self {
        Self::Source(err.to_string())
    }
}

/// All entries of one entity type, in load order, with an `id` lookup.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct KnowledgeBaseIndex {
    name: String,
    entries: Vec<KnowledgeEntry>,
    by_id: HashMap<String, usize>,
}

impl KnowledgeBaseIndex {
    /// Index `entries` as given. When an `id` repeats, the first occurrence
    /// owns the lookup; the later ones stay in `entries`.
    pub fn new(name: impl Into<String>, entries: Vec<KnowledgeEntry>) -> Self {
        let name = name.into();
        let mut by_id = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if by_id.contains_key(entry.id.as_str()) {
                warn!(entity_type = %name, id = %entry.id, "duplicate entry id");
                continue;
            }
            by_id.insert(entry.id.clone(), position);
        }
        Self {
            name,
            entries,
            by_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.by_id.get(id).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
