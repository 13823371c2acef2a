//! Phase two of an index build: rewriting reference properties from a
//! human-readable name to the referenced entry's `id`.

use hashbrown::HashMap;
use tracing::{debug, error};

use crate::entity_types;
use crate::entry::KnowledgeEntry;
use crate::{IndexError, KnowledgeBaseIndex};

/// A property of one entity type that names an entry of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRule {
    pub property: &'static str,
    pub target: &'static str,
}

const PROVINCE_COUNTRY: ReferenceRule = ReferenceRule {
    property: "country",
    target: entity_types::COUNTRY,
};

/// The reference rule for `entity_type`, if it has one.
///
/// Only provinces carry a reference today: their `country` value is the
/// country's name in the raw data.
pub fn reference_rule(entity_type: &str) -> Option<ReferenceRule> {
    match entity_type {
        entity_types::STATE_OR_PROVINCE => Some(PROVINCE_COUNTRY),
        _ => None,
    }
}

/// Map from each entry's first label to its id.
///
/// Labels are not checked for uniqueness; when two entries share a first
/// label the later one wins.
pub fn first_label_lookup(index: &KnowledgeBaseIndex) -> HashMap<&str, &str> {
    index
        .entries()
        .iter()
        .filter_map(|entry| entry.primary_label().map(|label| (label, entry.id.as_str())))
        .collect()
}

/// Replace each entry's `rule.property` value with the id of the target entry
/// whose first label equals it.
///
/// Entries without the property are left as they are. A value with no
/// matching target fails the whole build.
pub fn resolve_references(
    entity_type: &str,
    entries: &mut [KnowledgeEntry],
    rule: ReferenceRule,
    target: &KnowledgeBaseIndex,
) -> Result<(), IndexError> {
    let lookup = first_label_lookup(target);
    let mut resolved = 0usize;

    for entry in entries.iter_mut() {
        let Some(value) = entry.properties.get_mut(rule.property) else {
            continue;
        };
        match lookup.get(value.as_str()) {
            Some(id) => {
                *value = (*id).to_string();
                resolved += 1;
            }
            None => {
                error!(
                    entity_type,
                    entry_id = %entry.id,
                    property = rule.property,
                    value = %value,
                    target = rule.target,
                    "unresolved reference"
                );
                return Err(IndexError::MissingReference {
                    entity_type: entity_type.to_string(),
                    entry_id: entry.id.clone(),
                    property: rule.property.to_string(),
                    value: value.clone(),
                    target: rule.target.to_string(),
                });
            }
        }
    }

    debug!(
        entity_type,
        property = rule.property,
        target = rule.target,
        resolved,
        "resolved references"
    );
    Ok(())
}
