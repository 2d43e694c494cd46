// ── Domain model ──
//
// Canonical types the rest of the crate (and the CLI) work with. Built
// from `pharmadesk_api` wire records by `crate::convert`.

pub mod entity_id;
pub mod owner;
pub mod pharmacy;
pub mod reference;
pub mod shift;
pub mod user;

pub use entity_id::EntityId;
pub use owner::Owner;
pub use pharmacy::{OpeningHours, Pharmacy, SectorType};
pub use reference::Reference;
pub use shift::{EmailSummary, Shift};
pub use user::User;
