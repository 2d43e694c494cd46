// ── Shift report screen ──
//
// Monthly on-duty roster, optionally narrowed to one pharmacy code, with a
// single action: e-mail every listed owner. Changing either filter value
// re-fetches with both. The send posts exactly the rows on display.

use chrono::{Datelike, Local, Month};
use pharmadesk_api::ApiClient;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{EmailSummary, Reference, Shift};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftFilter {
    /// Pharmacy code name; `None` means every code.
    pub code: Option<String>,
    pub month: Month,
}

impl Default for ShiftFilter {
    fn default() -> Self {
        Self {
            code: None,
            month: current_month(),
        }
    }
}

/// The current calendar month in local time.
pub fn current_month() -> Month {
    Month::try_from(u8::try_from(Local::now().month()).unwrap_or(1)).unwrap_or(Month::January)
}

/// Parse a month given as a number (1-12) or an English name.
pub fn parse_month(raw: &str) -> Option<Month> {
    let raw = raw.trim();
    match raw.parse::<u8>() {
        Ok(n) => Month::try_from(n).ok(),
        Err(_) => raw.parse::<Month>().ok(),
    }
}

#[derive(Debug, Default)]
pub struct ShiftReport {
    filter: ShiftFilter,
    codes: Vec<Reference>,
    shifts: Vec<Shift>,
    error: Option<String>,
    success: Option<String>,
}

impl ShiftReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: ShiftFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &ShiftFilter {
        &self.filter
    }

    pub fn codes(&self) -> &[Reference] {
        &self.codes
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    /// Load the pharmacy code choices. Done once when the screen opens.
    pub async fn load_codes(&mut self, api: &ApiClient) -> Result<(), CoreError> {
        match api.list_codes().await {
            Ok(codes) => {
                self.codes = codes.into_iter().map(Reference::from).collect();
                Ok(())
            }
            Err(e) => {
                let e = CoreError::from(e);
                warn!(error = %e, "loading pharmacy codes failed");
                self.error = Some(format!("failed to load codes: {e}"));
                Err(e)
            }
        }
    }

    /// Fetch shifts for the current filter.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), CoreError> {
        self.error = None;
        let month = self.filter.month.number_from_month();
        match api.list_shifts(self.filter.code.as_deref(), month).await {
            Ok(rows) => {
                debug!(count = rows.len(), month, code = ?self.filter.code, "shifts loaded");
                self.shifts = rows.into_iter().map(Shift::from).collect();
                Ok(())
            }
            Err(e) => {
                let e = CoreError::from(e);
                warn!(error = %e, "loading shifts failed");
                self.error = Some(format!("failed to load shifts: {e}"));
                Err(e)
            }
        }
    }

    /// Change the code filter (blank clears it) and re-fetch.
    pub async fn set_code(&mut self, api: &ApiClient, code: Option<String>) -> Result<(), CoreError> {
        self.filter.code = code.filter(|c| !c.trim().is_empty());
        self.refresh(api).await
    }

    /// Change the month and re-fetch.
    pub async fn set_month(&mut self, api: &ApiClient, month: Month) -> Result<(), CoreError> {
        self.filter.month = month;
        self.refresh(api).await
    }

    /// E-mail the owners of every displayed shift. One request, no retry.
    ///
    /// Rows go out exactly as the backend returned them.
    pub async fn send_emails(&mut self, api: &ApiClient) -> Result<EmailSummary, CoreError> {
        if self.shifts.is_empty() {
            let e = CoreError::NothingToSend;
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.error = None;
        self.success = None;

        let records: Vec<_> = self.shifts.iter().map(|s| s.record().clone()).collect();
        match api.send_shift_emails(&records).await {
            Ok(report) => {
                let summary = EmailSummary::from(report);
                info!(
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    "shift e-mails sent"
                );
                self.success = Some(if summary.failed > 0 {
                    format!("{}. {} failed, see details.", summary.message, summary.failed)
                } else {
                    summary.message.clone()
                });
                Ok(summary)
            }
            Err(e) => {
                let e = CoreError::from(e);
                warn!(error = %e, "sending shift e-mails failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
