// Wire types for the pharmacy administration REST API
//
// Field names follow the backend exactly, including its own spellings
// (`fistLastName`, `Zone_id`). The backend is loose about JSON types for
// numeric-looking columns (ci, nit, coordinates arrive as numbers or
// strings depending on the row), so those fields go through `flex`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Server-assigned identifier. The backend emits integers today, but the
/// client never does arithmetic on them, so strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

// ── Owner ────────────────────────────────────────────────────────────

/// Pharmacy owner from `GET /api/duenios`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "fistLastName")]
    pub first_last_name: String,
    #[serde(default, rename = "secondSurname")]
    pub second_surname: Option<String>,
    #[serde(default, deserialize_with = "flex::text")]
    pub ci: String,
    #[serde(default, deserialize_with = "flex::text")]
    pub cellphone: String,
    #[serde(default)]
    pub gmail: Option<String>,
}

/// Body for `POST /api/duenios` and `PUT /api/duenios/{id}`.
///
/// Empty optional fields are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerPayload {
    pub name: String,
    #[serde(rename = "fistLastName")]
    pub first_last_name: String,
    #[serde(rename = "secondSurname")]
    pub second_surname: Option<String>,
    pub ci: String,
    pub cellphone: String,
    pub gmail: Option<String>,
}

// ── Pharmacy ─────────────────────────────────────────────────────────

/// Pharmacy from `GET /api/farmacias`.
///
/// `zone_name` and `owner_name` are joined in by the list endpoint and are
/// display-only; they never go back to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacyRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "recordNumber", deserialize_with = "flex::text")]
    pub record_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "flex::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, rename = "businessName")]
    pub business_name: String,
    #[serde(default, deserialize_with = "flex::text")]
    pub nit: String,
    /// 8 or 12 hours.
    #[serde(default, rename = "openingHours", deserialize_with = "flex::opt_i64")]
    pub opening_hours: Option<i64>,
    /// 0 = private, 1 = public.
    #[serde(default, rename = "sectorType", deserialize_with = "flex::opt_i64")]
    pub sector_type: Option<i64>,
    #[serde(default, rename = "Zone_id")]
    pub zone_id: Option<RecordId>,
    #[serde(default, rename = "Owner_id")]
    pub owner_id: Option<RecordId>,
    #[serde(default, rename = "Code_id")]
    pub code_id: Option<RecordId>,
    #[serde(default, rename = "User_id")]
    pub user_id: Option<RecordId>,
    #[serde(default, rename = "ControlledSubstances_id")]
    pub controlled_substances_id: Option<RecordId>,
    /// `data:<mime>;base64,...` URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
}

/// Body for `POST /api/farmacias` and `PUT /api/farmacias/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacyPayload {
    pub name: String,
    #[serde(rename = "recordNumber")]
    pub record_number: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "businessName")]
    pub business_name: String,
    pub nit: String,
    #[serde(rename = "openingHours")]
    pub opening_hours: i64,
    #[serde(rename = "sectorType")]
    pub sector_type: i64,
    #[serde(rename = "Zone_id")]
    pub zone_id: RecordId,
    #[serde(rename = "Owner_id")]
    pub owner_id: RecordId,
    #[serde(rename = "Code_id")]
    pub code_id: RecordId,
    #[serde(rename = "User_id")]
    pub user_id: RecordId,
    #[serde(rename = "ControlledSubstances_id")]
    pub controlled_substances_id: Option<RecordId>,
    pub image: Option<String>,
}

// ── User ─────────────────────────────────────────────────────────────

/// Console user from `GET /api/usuarios`. The password hash, if the
/// backend leaks one, is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub gmail: String,
    #[serde(default)]
    pub rol: String,
}

/// Body for `POST /api/usuarios` and `PUT /api/usuarios/{id}`.
///
/// `password` is omitted entirely when `None` so an update keeps the
/// stored password.
#[derive(Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub gmail: String,
    pub rol: String,
}

impl fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPayload")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("gmail", &self.gmail)
            .field("rol", &self.rol)
            .finish()
    }
}

// ── Reference lists ──────────────────────────────────────────────────

/// Zone, pharmacy code, or controlled substance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "flex::text")]
    pub name: String,
}

// ── Shifts ───────────────────────────────────────────────────────────

/// On-duty shift row from `GET /api/turnos/filtrados`.
///
/// The typed fields are a read-only view. The row itself is kept exactly as
/// received and is what goes back to `POST /api/turnos/enviar-correos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct ShiftRecord {
    pub pharmacy_id: RecordId,
    pub pharmacy_code: String,
    pub pharmacy_name: String,
    /// ISO date or timestamp, as the backend formats it.
    pub shift_date: String,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    raw: serde_json::Value,
}

#[derive(Deserialize)]
struct ShiftFields {
    pharmacy_id: RecordId,
    #[serde(default, deserialize_with = "flex::text")]
    pharmacy_code: String,
    #[serde(default, deserialize_with = "flex::text")]
    pharmacy_name: String,
    #[serde(default, deserialize_with = "flex::text")]
    shift_date: String,
    #[serde(default)]
    owner_name: Option<String>,
    #[serde(default)]
    owner_email: Option<String>,
}

impl ShiftRecord {
    /// The row as the backend sent it.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

impl TryFrom<serde_json::Value> for ShiftRecord {
    type Error = serde_json::Error;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        let f = ShiftFields::deserialize(&raw)?;
        Ok(Self {
            pharmacy_id: f.pharmacy_id,
            pharmacy_code: f.pharmacy_code,
            pharmacy_name: f.pharmacy_name,
            shift_date: f.shift_date,
            owner_name: f.owner_name,
            owner_email: f.owner_email,
            raw,
        })
    }
}

impl From<ShiftRecord> for serde_json::Value {
    fn from(r: ShiftRecord) -> Self {
        r.raw
    }
}

/// Summary returned by `POST /api/turnos/enviar-correos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReport {
    #[serde(default, rename = "exitosos")]
    pub succeeded: u64,
    #[serde(default, rename = "fallidos")]
    pub failed: u64,
    #[serde(default)]
    pub message: String,
    /// Per-recipient outcome; shape is backend-defined.
    #[serde(default, rename = "detalles")]
    pub details: Vec<serde_json::Value>,
}

// ── Lenient field decoding ───────────────────────────────────────────

pub(crate) mod flex {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number, string, or null → `String` (null becomes empty).
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Number or numeric string → `f64`. Empty strings and null are `None`.
    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Value::deserialize(d)? {
            Value::Number(n) => Ok(n.as_f64()),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("not a number: {s:?}"))),
            Value::Null => Ok(None),
            other => Err(serde::de::Error::custom(format!(
                "expected number, got {other}"
            ))),
        }
    }

    /// Integer or integer string → `i64`. Empty strings and null are `None`.
    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(d)? {
            Value::Number(n) => Ok(n.as_i64()),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("not an integer: {s:?}"))),
            Value::Null => Ok(None),
            other => Err(serde::de::Error::custom(format!(
                "expected integer, got {other}"
            ))),
        }
    }
}
