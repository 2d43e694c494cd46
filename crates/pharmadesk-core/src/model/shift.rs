// ── Shift domain types ──

use chrono::NaiveDate;
use pharmadesk_api::ShiftRecord;
use serde::Serialize;

use super::entity_id::EntityId;

/// On-duty shift assignment. Read-only on the client.
#[derive(Debug, Clone, Serialize)]
pub struct Shift {
    pub pharmacy_id: EntityId,
    pub pharmacy_code: String,
    pub pharmacy_name: String,
    pub shift_date: String,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,

    /// The row as received; sent back unchanged when e-mailing owners.
    #[serde(skip)]
    pub(crate) record: ShiftRecord,
}

impl Shift {
    /// Calendar date of the shift. Accepts `YYYY-MM-DD` or an ISO
    /// timestamp starting with one.
    pub fn date(&self) -> Option<NaiveDate> {
        let head = self.shift_date.get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    pub fn record(&self) -> &ShiftRecord {
        &self.record
    }
}

/// Outcome of a bulk e-mail send, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailSummary {
    pub succeeded: u64,
    pub failed: u64,
    pub message: String,
    pub details: Vec<serde_json::Value>,
}
