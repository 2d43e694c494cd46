// ── Owner domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Pharmacy owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: EntityId,
    pub name: String,
    pub first_last_name: String,
    pub second_surname: Option<String>,
    /// National identity card number.
    pub ci: String,
    pub cellphone: String,
    pub gmail: Option<String>,
}

impl Owner {
    /// "Name FirstLastName SecondSurname", skipping blanks.
    pub fn full_name(&self) -> String {
        [
            Some(self.name.as_str()),
            Some(self.first_last_name.as_str()),
            self.second_surname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}
