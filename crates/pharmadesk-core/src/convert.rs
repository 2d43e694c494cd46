// ── API-to-domain type conversions ──
//
// Bridges raw `pharmadesk_api` records into `crate::model` types. Blank
// optional strings become `None`; out-of-range enum codes fall back to
// the form defaults with a warning rather than failing the whole list.
// The raw codes stay on the record so an edit never rewrites them.

use pharmadesk_api::{
    EmailReport, OwnerRecord, PharmacyRecord, ReferenceRecord, ShiftRecord, UserRecord,
};
use tracing::warn;

use crate::model::{
    EmailSummary, EntityId, OpeningHours, Owner, Pharmacy, Reference, SectorType, Shift, User,
};

// ── Helpers ────────────────────────────────────────────────────────

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

// ── Conversions ────────────────────────────────────────────────────

impl From<OwnerRecord> for Owner {
    fn from(r: OwnerRecord) -> Self {
        Self {
            id: r.id.into(),
            name: r.name,
            first_last_name: r.first_last_name,
            second_surname: non_blank(r.second_surname),
            ci: r.ci,
            cellphone: r.cellphone,
            gmail: non_blank(r.gmail),
        }
    }
}

impl From<PharmacyRecord> for Pharmacy {
    fn from(r: PharmacyRecord) -> Self {
        let opening_hours = match r.opening_hours {
            None => OpeningHours::default(),
            Some(h) => OpeningHours::from_hours(h).unwrap_or_else(|| {
                warn!(id = %r.id, hours = h, "unexpected openingHours, using default");
                OpeningHours::default()
            }),
        };
        let sector_type = match r.sector_type {
            None => SectorType::default(),
            Some(c) => SectorType::from_code(c).unwrap_or_else(|| {
                warn!(id = %r.id, code = c, "unexpected sectorType, using default");
                SectorType::default()
            }),
        };

        Self {
            id: r.id.into(),
            name: r.name,
            record_number: r.record_number,
            address: r.address,
            latitude: r.latitude,
            longitude: r.longitude,
            business_name: r.business_name,
            nit: r.nit,
            opening_hours,
            sector_type,
            opening_hours_code: r.opening_hours,
            sector_type_code: r.sector_type,
            zone_id: r.zone_id.map(EntityId::from),
            owner_id: r.owner_id.map(EntityId::from),
            code_id: r.code_id.map(EntityId::from),
            user_id: r.user_id.map(EntityId::from),
            controlled_substance_id: r.controlled_substances_id.map(EntityId::from),
            image: non_blank(r.image),
            zone_name: non_blank(r.zone_name),
            owner_name: non_blank(r.owner_name),
        }
    }
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id.into(),
            username: r.username,
            gmail: r.gmail,
            rol: r.rol,
        }
    }
}

impl From<ReferenceRecord> for Reference {
    fn from(r: ReferenceRecord) -> Self {
        Self {
            id: r.id.into(),
            name: r.name,
        }
    }
}

impl From<ShiftRecord> for Shift {
    fn from(r: ShiftRecord) -> Self {
        Self {
            pharmacy_id: r.pharmacy_id.clone().into(),
            pharmacy_code: r.pharmacy_code.clone(),
            pharmacy_name: r.pharmacy_name.clone(),
            shift_date: r.shift_date.clone(),
            owner_name: non_blank(r.owner_name.clone()),
            owner_email: non_blank(r.owner_email.clone()),
            record: r,
        }
    }
}

impl From<EmailReport> for EmailSummary {
    fn from(r: EmailReport) -> Self {
        Self {
            succeeded: r.succeeded,
            failed: r.failed,
            message: r.message,
            details: r.details,
        }
    }
}
