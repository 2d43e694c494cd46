// ── Entity list page ──
//
// Fetch-render-mutate-refresh loop shared by owners, pharmacies, and
// users. The page owns the rows, a single form slot, and a blocking alert
// for load/delete failures. Forms report back through `apply`, and
// closing the form always re-fetches so the server stays the source of
// truth.

use pharmadesk_api::ApiClient;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::form::{FormMode, SubmitOutcome};
use crate::model::EntityId;
use crate::resource::Resource;

pub struct ListPage<R: Resource> {
    rows: Option<Vec<R>>,
    form: Option<FormMode>,
    alert: Option<String>,
}

impl<R: Resource> Default for ListPage<R> {
    fn default() -> Self {
        Self {
            rows: None,
            form: None,
            alert: None,
        }
    }
}

impl<R: Resource> ListPage<R> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch the full collection. On failure the rows stay unset and a
    /// blocking alert is recorded.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), CoreError> {
        match R::list(api).await {
            Ok(rows) => {
                debug!(kind = R::KIND, count = rows.len(), "list loaded");
                self.rows = Some(rows);
                Ok(())
            }
            Err(e) => {
                warn!(kind = R::KIND, error = %e, "list load failed");
                self.alert = Some(format!("failed to load {}: {e}", R::PLURAL));
                Err(e)
            }
        }
    }

    /// Loaded rows, or `None` before the first successful load.
    pub fn rows(&self) -> Option<&[R]> {
        self.rows.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Rows whose display name contains `query`, ignoring case.
    pub fn filtered(&self, query: &str) -> Vec<&R> {
        let needle = query.trim().to_lowercase();
        self.rows
            .iter()
            .flatten()
            .filter(|r| needle.is_empty() || r.display_name().to_lowercase().contains(&needle))
            .collect()
    }

    fn find(&self, id: &EntityId) -> Option<&R> {
        self.rows.iter().flatten().find(|r| r.id() == id)
    }

    // ── Form slot ────────────────────────────────────────────────────

    pub fn form_mode(&self) -> Option<&FormMode> {
        self.form.as_ref()
    }

    pub fn open_create(&mut self) -> Result<(), CoreError> {
        if self.form.is_some() {
            return Err(CoreError::FormAlreadyOpen);
        }
        self.form = Some(FormMode::Create);
        Ok(())
    }

    /// Open the edit form for a loaded row, returning it for pre-fill.
    pub fn open_edit(&mut self, id: &EntityId) -> Result<&R, CoreError> {
        if self.form.is_some() {
            return Err(CoreError::FormAlreadyOpen);
        }
        if self.find(id).is_none() {
            return Err(CoreError::NotFound {
                entity_type: R::KIND.to_owned(),
                identifier: id.to_string(),
            });
        }
        self.form = Some(FormMode::Edit(id.clone()));
        self.find(id).ok_or_else(|| CoreError::Internal("row vanished".into()))
    }

    /// Fold a successful submit into the rows: creates append, updates
    /// replace in place.
    pub fn apply(&mut self, outcome: SubmitOutcome<R>) {
        let rows = self.rows.get_or_insert_with(Vec::new);
        match outcome {
            SubmitOutcome::Created(record) => rows.push(record),
            SubmitOutcome::Updated(record) => {
                if let Some(slot) = rows.iter_mut().find(|r| r.id() == record.id()) {
                    *slot = record;
                } else {
                    rows.push(record);
                }
            }
        }
    }

    /// Close the form slot and re-fetch the collection.
    pub async fn close_form(&mut self, api: &ApiClient) -> Result<(), CoreError> {
        self.form = None;
        self.load(api).await
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Confirm, then delete. Declining sends nothing and returns
    /// `Ok(false)`; a confirmed delete removes exactly one row.
    pub async fn delete<F>(&mut self, api: &ApiClient, id: &EntityId, confirm: F) -> Result<bool, CoreError>
    where
        F: FnOnce(&str) -> bool,
    {
        let prompt = match (self.rows.is_some(), self.find(id)) {
            (_, Some(row)) => format!("Delete {} {:?}?", R::KIND, row.display_name()),
            (true, None) => {
                return Err(CoreError::NotFound {
                    entity_type: R::KIND.to_owned(),
                    identifier: id.to_string(),
                });
            }
            (false, None) => format!("Delete {} {id}?", R::KIND),
        };

        if !confirm(&prompt) {
            debug!(kind = R::KIND, %id, "delete declined");
            return Ok(false);
        }

        match R::delete(api, id).await {
            Ok(()) => {
                if let Some(rows) = self.rows.as_mut() {
                    if let Some(pos) = rows.iter().position(|r| r.id() == id) {
                        rows.remove(pos);
                    }
                }
                Ok(true)
            }
            Err(e) => {
                warn!(kind = R::KIND, %id, error = %e, "delete failed");
                self.alert = Some(format!("could not delete {}: {e}", R::KIND));
                Err(e)
            }
        }
    }
}
