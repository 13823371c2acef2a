use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Property constraints used to filter candidates: key → required value.
pub type Constraints = BTreeMap<String, String>;

/// One canonical concept of a knowledge base.
///
/// `labels[0]` is the canonical name, the rest are aliases. Property values
/// are always plain strings; reference properties (a province's `country`)
/// hold the referenced entry's `id` once the index is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl KnowledgeEntry {
    pub fn new<I, S>(id: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Canonical name, if the entry has any label.
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// True when every constraint is present with exactly the required value.
    ///
    /// A missing key fails the constraint; it is not a wildcard.
    pub fn satisfies(&self, constraints: &Constraints) -> bool {
        constraints
            .iter()
            .all(|(key, value)| self.properties.get(key) == Some(value))
    }
}
