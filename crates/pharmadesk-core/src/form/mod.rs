// ── Entity forms ──
//
// One generic create/edit form, instantiated per entity by a `FormSchema`.
// The form owns the raw text the user typed (keyed by the backend's field
// names), validates the required set, coerces numeric fields, and issues
// exactly one POST or PUT per successful submit.

pub mod image;
pub mod location;
pub mod owner;
pub mod pharmacy;
pub mod user;

use std::future::Future;
use std::marker::PhantomData;

use indexmap::IndexMap;
use pharmadesk_api::ApiClient;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::EntityId;
use crate::resource::Resource;

pub use owner::OwnerSchema;
pub use pharmacy::{PharmacyForm, PharmacySchema, ReferenceLists};
pub use user::UserSchema;

// ── Field descriptions ─────────────────────────────────────────────

/// When a field must be non-blank for submit to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    /// Required in create mode only (user password).
    OnCreate,
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Backend field name; also the key accepted by [`Form::set`].
    pub name: &'static str,
    pub label: &'static str,
    pub requirement: Requirement,
    /// Initial value in create mode.
    pub default: &'static str,
    /// Held as a `SecretString` and never pre-filled.
    pub secret: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            requirement: Requirement::Always,
            default: "",
            secret: false,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            requirement: Requirement::Optional,
            default: "",
            secret: false,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    pub const fn secret_on_create(mut self) -> Self {
        self.requirement = Requirement::OnCreate;
        self.secret = true;
        self
    }
}

// ── Mode and outcome ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the record with this id. The id never changes while open.
    Edit(EntityId),
}

/// Result of a successful submit, applied to the list page.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    Created(R),
    Updated(R),
}

impl<R> SubmitOutcome<R> {
    pub fn record(&self) -> &R {
        match self {
            Self::Created(r) | Self::Updated(r) => r,
        }
    }

    pub fn into_record(self) -> R {
        match self {
            Self::Created(r) | Self::Updated(r) => r,
        }
    }
}

// ── Field values ───────────────────────────────────────────────────

/// Raw form state, in schema field order.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    text: IndexMap<&'static str, String>,
    secrets: IndexMap<&'static str, SecretString>,
}

impl FormValues {
    /// Raw text of a field; empty when unset.
    pub fn get(&self, name: &str) -> &str {
        self.text.get(name).map_or("", String::as_str)
    }

    /// Trimmed text.
    pub fn text(&self, name: &str) -> String {
        self.get(name).trim().to_owned()
    }

    /// Trimmed text, `None` when blank.
    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.get(name).trim();
        (!value.is_empty()).then(|| value.to_owned())
    }

    /// Secret value, `None` when blank or unset.
    pub fn secret(&self, name: &str) -> Option<&SecretString> {
        self.secrets
            .get(name)
            .filter(|s| !s.expose_secret().trim().is_empty())
    }

    fn is_blank(&self, name: &str) -> bool {
        match self.secrets.get(name) {
            Some(secret) => secret.expose_secret().trim().is_empty(),
            None => self.get(name).trim().is_empty(),
        }
    }

    /// Finite decimal number.
    pub fn number(&self, name: &str) -> Result<f64, CoreError> {
        let raw = self.get(name).trim();
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(CoreError::invalid(name, format!("{raw:?} is not a number"))),
        }
    }

    /// Integer.
    pub fn integer(&self, name: &str) -> Result<i64, CoreError> {
        let raw = self.get(name).trim();
        raw.parse()
            .map_err(|_| CoreError::invalid(name, format!("{raw:?} is not a whole number")))
    }

    /// Numeric foreign key.
    pub fn id(&self, name: &str) -> Result<EntityId, CoreError> {
        let raw = self.get(name).trim();
        EntityId::parse_numeric(raw)
            .ok_or_else(|| CoreError::invalid(name, format!("{raw:?} is not a numeric id")))
    }

    /// Optional numeric foreign key; blank means `None`.
    pub fn optional_id(&self, name: &str) -> Result<Option<EntityId>, CoreError> {
        if self.get(name).trim().is_empty() {
            Ok(None)
        } else {
            self.id(name).map(Some)
        }
    }

    /// Optional e-mail address with a minimal shape check.
    pub fn optional_email(&self, name: &str) -> Result<Option<String>, CoreError> {
        let Some(value) = self.optional(name) else {
            return Ok(None);
        };
        if looks_like_email(&value) {
            Ok(Some(value))
        } else {
            Err(CoreError::invalid(name, format!("{value:?} is not an e-mail address")))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && domain.contains('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

// ── Schema ─────────────────────────────────────────────────────────

/// Per-entity form description.
pub trait FormSchema {
    type Record: Resource;
    type Payload: Send + Sync;

    const FIELDS: &'static [FieldSpec];

    /// Field values for edit mode. Secret fields are never pre-filled.
    fn prefill(record: &Self::Record) -> Vec<(&'static str, String)>;

    /// Validate and coerce the raw values into a request body.
    fn payload(values: &FormValues, mode: &FormMode) -> Result<Self::Payload, CoreError>;

    fn create(
        api: &ApiClient,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Self::Record, CoreError>> + Send;

    fn update(
        api: &ApiClient,
        id: &EntityId,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Self::Record, CoreError>> + Send;
}

// ── Form ───────────────────────────────────────────────────────────

pub struct Form<S: FormSchema> {
    mode: FormMode,
    values: FormValues,
    error: Option<String>,
    _schema: PhantomData<S>,
}

impl<S: FormSchema> Form<S> {
    /// Blank form with schema defaults.
    pub fn create() -> Self {
        let mut values = FormValues::default();
        for spec in S::FIELDS {
            if spec.secret {
                values.secrets.insert(spec.name, SecretString::from(String::new()));
            } else {
                values.text.insert(spec.name, spec.default.to_owned());
            }
        }
        Self {
            mode: FormMode::Create,
            values,
            error: None,
            _schema: PhantomData,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn edit(record: &S::Record) -> Self {
        let mut form = Self::create();
        form.mode = FormMode::Edit(record.id().clone());
        for (name, value) in S::prefill(record) {
            if form.values.text.contains_key(name) {
                form.values.text.insert(name, value);
            }
        }
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field)
    }

    /// Update one field, as on every keystroke.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let spec = S::FIELDS
            .iter()
            .find(|f| f.name == field)
            .ok_or_else(|| CoreError::UnknownField {
                field: field.to_owned(),
            })?;
        let value = value.into();
        if spec.secret {
            self.values.secrets.insert(spec.name, SecretString::from(value));
        } else {
            self.values.text.insert(spec.name, value);
        }
        Ok(())
    }

    /// Required fields that are blank, in schema order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let creating = self.mode == FormMode::Create;
        S::FIELDS
            .iter()
            .filter(|f| match f.requirement {
                Requirement::Always => true,
                Requirement::OnCreate => creating,
                Requirement::Optional => false,
            })
            .filter(|f| self.values.is_blank(f.name))
            .map(|f| f.name)
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Validate, coerce, and send. Exactly one request on success.
    ///
    /// On any failure the message is kept in [`Form::error`] and the form
    /// stays open with its values intact. The exclusive borrow keeps a
    /// second submit out while one is in flight.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<SubmitOutcome<S::Record>, CoreError> {
        self.error = None;

        let result = self.send(api).await;

        if let Err(ref e) = result {
            warn!(kind = S::Record::KIND, error = %e, "form submit failed");
            self.error = Some(e.to_string());
        }
        result
    }

    async fn send(&self, api: &ApiClient) -> Result<SubmitOutcome<S::Record>, CoreError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(CoreError::MissingFields {
                fields: missing.into_iter().map(str::to_owned).collect(),
            });
        }

        let payload = S::payload(&self.values, &self.mode)?;

        match &self.mode {
            FormMode::Create => {
                debug!(kind = S::Record::KIND, "submitting create");
                S::create(api, &payload).await.map(SubmitOutcome::Created)
            }
            FormMode::Edit(id) => {
                debug!(kind = S::Record::KIND, %id, "submitting update");
                S::update(api, id, &payload).await.map(SubmitOutcome::Updated)
            }
        }
    }
}
