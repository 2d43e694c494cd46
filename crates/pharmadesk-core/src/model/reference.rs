// ── Reference list entry (zone, pharmacy code, controlled substance) ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: EntityId,
    pub name: String,
}

/// Find an entry by id, or failing that by case-insensitive name.
pub fn lookup<'a>(entries: &'a [Reference], needle: &str) -> Option<&'a Reference> {
    let needle = needle.trim();
    let by_id = EntityId::from(needle);
    entries
        .iter()
        .find(|r| r.id == by_id)
        .or_else(|| entries.iter().find(|r| r.name.eq_ignore_ascii_case(needle)))
}
