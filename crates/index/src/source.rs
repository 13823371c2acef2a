use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::KnowledgeEntry;
use crate::IndexError;

/// Supplier of raw knowledge-base entries, one batch per entity type.
///
/// This is the seam to whatever parses the knowledge-base files. Entries are
/// returned in load order; that order is the tie-break order for linking.
pub trait EntrySource: Send + Sync {
    /// Load every entry of `entity_type`, in order.
    fn load(&self, entity_type: &str) -> Result<Vec<KnowledgeEntry>, IndexError>;
}

/// Entries held in memory, keyed by entity type. Useful for tests and for
/// callers that parse the knowledge base themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    entries: HashMap<String, Vec<KnowledgeEntry>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, entity_type: impl Into<String>, entries: Vec<KnowledgeEntry>) -> Self {
        self.insert(entity_type, entries);
        self
    }

    /// Replace the entries of `entity_type`.
    pub fn insert(&mut self, entity_type: impl Into<String>, entries: Vec<KnowledgeEntry>) {
        self.entries.insert(entity_type.into(), entries);
    }
}

impl EntrySource for InMemorySource {
    fn load(&self, entity_type: &str) -> Result<Vec<KnowledgeEntry>, IndexError> {
        self.entries
            .get(entity_type)
            .cloned()
            .ok_or_else(|| IndexError::UnknownEntityType(entity_type.to_string()))
    }
}

/// Reads `<root>/<entity_type>.json`, a JSON array of
/// `{"id": ..., "labels": [...], "properties": {...}}` objects.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, entity_type: &str) -> Result<PathBuf, IndexError> {
        // Entity types are bare names, never paths.
        let is_bare = !entity_type.is_empty()
            && entity_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !is_bare {
            return Err(IndexError::UnknownEntityType(entity_type.to_string()));
        }
        Ok(self.root.join(format!("{entity_type}.json")))
    }
}

impl EntrySource for JsonDirSource {
    fn load(&self, entity_type: &str) -> Result<Vec<KnowledgeEntry>, IndexError> {
        let path = self.path_for(entity_type)?;
        let raw = fs::read_to_string(&path).map_err(|err| {
            IndexError::source_error(format!("failed to read {}: {err}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|err| IndexError::Decode(format!("{}: {err}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn in_memory_returns_entries_in_order() {
        let source = InMemorySource::new().with_entries(
            "unit",
            vec![
                KnowledgeEntry::new("unit:t", ["tonne"]),
                KnowledgeEntry::new("unit:kg", ["kilogram"]),
            ],
        );
        let loaded = source.load("unit").expect("known entity type");
        let ids: Vec<&str> = loaded.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["unit:t", "unit:kg"]);
    }

    #[test]
    fn in_memory_unknown_type_is_an_error() {
        let source = InMemorySource::new();
        assert!(matches!(
            source.load("unit"),
            Err(IndexError::UnknownEntityType(name)) if name == "unit"
        ));
    }

    #[test]
    fn json_dir_reads_entity_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut file = fs::File::create(dir.path().join("commodity.json")).expect("create");
        write!(
            file,
            r#"[
                {{"id": "c:cu", "labels": ["Copper", "Cu"]}},
                {{"id": "c:au", "labels": ["Gold"], "properties": {{"group": "precious"}}}}
            ]"#
        )
        .expect("write");

        let source = JsonDirSource::new(dir.path());
        let entries = source.load("commodity").expect("load");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].property("group"), Some("precious"));
    }

    #[test]
    fn json_dir_missing_file_is_a_source_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(source.load("unit"), Err(IndexError::Source(_))));
    }

    #[test]
    fn json_dir_malformed_file_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("unit.json"), "{not json").expect("write");
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(source.load("unit"), Err(IndexError::Decode(_))));
    }

    #[test]
    fn json_dir_rejects_path_like_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(
            source.load("../secrets"),
            Err(IndexError::UnknownEntityType(_))
        ));
    }
}
