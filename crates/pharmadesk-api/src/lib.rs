// pharmadesk-api: Async Rust client for the pharmacy administration REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod owners;
mod pharmacies;
mod references;
mod shifts;
mod users;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    EmailReport, OwnerPayload, OwnerRecord, PharmacyPayload, PharmacyRecord, RecordId,
    ReferenceRecord, ShiftRecord, UserPayload, UserRecord,
};
pub use transport::{TlsMode, TransportConfig};
