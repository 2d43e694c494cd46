// ── Console user domain type ──
//
// Never carries a password: the backend accepts one on write but the
// client has no reason to hold it after the request.

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub gmail: String,
    pub rol: String,
}
