// On-duty shift endpoints (`/api/turnos`)

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{EmailReport, ShiftRecord};

#[derive(Serialize)]
struct SendEmailsRequest<'a> {
    turnos: &'a [ShiftRecord],
}

impl ApiClient {
    /// Shifts for a calendar month, optionally narrowed to one pharmacy code.
    ///
    /// `GET /api/turnos/filtrados?codigo=...&mes=...`. An unset code is
    /// sent as an empty string, which the backend reads as "all codes".
    pub async fn list_shifts(&self, code: Option<&str>, month: u32) -> Result<Vec<ShiftRecord>, Error> {
        debug!(?code, month, "listing shifts");
        let params = [
            ("codigo", code.unwrap_or_default().to_owned()),
            ("mes", month.to_string()),
        ];
        self.get_with_params("turnos/filtrados", &params).await
    }

    /// Ask the backend to e-mail every owner in `shifts` about their shift.
    ///
    /// `POST /api/turnos/enviar-correos`
    pub async fn send_shift_emails(&self, shifts: &[ShiftRecord]) -> Result<EmailReport, Error> {
        debug!(count = shifts.len(), "sending shift e-mails");
        self.post("turnos/enviar-correos", &SendEmailsRequest { turnos: shifts })
            .await
    }
}
