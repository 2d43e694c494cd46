// pharmadesk-core: Entity lifecycle between pharmadesk-api and consumers (CLI).

pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod form;
pub mod guard;
pub mod model;
pub mod page;
pub mod resource;
pub mod session;
pub mod shift_report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, TlsVerification};
pub use console::Console;
pub use error::CoreError;
pub use form::location::{DEFAULT_CENTER, GeoPoint, LocationPicker};
pub use form::{
    FieldSpec, Form, FormMode, FormSchema, FormValues, OwnerSchema, PharmacyForm, PharmacySchema,
    ReferenceLists, Requirement, SubmitOutcome, UserSchema,
};
pub use guard::{Route, RouteGuard};
pub use page::ListPage;
pub use resource::Resource;
pub use session::{Session, SessionState};
pub use shift_report::{ShiftFilter, ShiftReport};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    EmailSummary, EntityId, OpeningHours, Owner, Pharmacy, Reference, SectorType, Shift, User,
};
