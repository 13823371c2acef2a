use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::resolve::{reference_rule, resolve_references};
use crate::source::EntrySource;
use crate::{IndexError, KnowledgeBaseIndex};

type Slot = Arc<OnceCell<Arc<KnowledgeBaseIndex>>>;

/// Builds each knowledge-base index at most once and shares it afterwards.
///
/// The map lock is held only to find or create a slot. The build itself runs
/// inside the slot's `OnceCell`, so concurrent callers asking for the same
/// name wait on a single build while other names proceed independently. A
/// failed build leaves its slot empty; the next call retries.
pub struct IndexRegistry {
    source: Arc<dyn EntrySource>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl IndexRegistry {
    pub fn new(source: Arc<dyn EntrySource>) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &Arc<dyn EntrySource> {
        &self.source
    }

    /// The index for `name`, building it on first use.
    pub fn get_index(&self, name: &str) -> Result<Arc<KnowledgeBaseIndex>, IndexError> {
        let slot = self.slot(name)?;
        slot.get_or_try_init(|| self.build(name).map(Arc::new))
            .cloned()
    }

    /// The index for `name` if it has already been built.
    pub fn cached(&self, name: &str) -> Option<Arc<KnowledgeBaseIndex>> {
        let slots = self.slots.lock().ok()?;
        slots.get(name).and_then(|slot| slot.get().cloned())
    }

    fn slot(&self, name: &str) -> Result<Slot, IndexError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| IndexError::source_error("poisoned registry lock"))?;
        Ok(Arc::clone(slots.entry(name.to_string()).or_default()))
    }

    fn build(&self, name: &str) -> Result<KnowledgeBaseIndex, IndexError> {
        debug!(entity_type = name, "building index");

        let loaded = self.source.load(name)?;
        let total = loaded.len();
        let mut entries: Vec<_> = loaded
            .into_iter()
            .filter(|entry| !entry.labels.is_empty())
            .collect();
        if entries.len() < total {
            debug!(
                entity_type = name,
                dropped = total - entries.len(),
                "dropped entries without labels"
            );
        }

        if let Some(rule) = reference_rule(name) {
            let target = self.get_index(rule.target)?;
            resolve_references(name, &mut entries, rule, &target)?;
        }

        let index = KnowledgeBaseIndex::new(name, entries);
        info!(entity_type = name, entries = index.len(), "index published");
        Ok(index)
    }
}

impl std::fmt::Debug for IndexRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let built: Vec<String> = self
            .slots
            .lock()
            .map(|slots| {
                slots
                    .iter()
                    .filter(|(_, slot)| slot.get().is_some())
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default();
        f.debug_struct("IndexRegistry").field("built", &built).finish()
    }
}
