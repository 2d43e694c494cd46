// ── Core identity type ──
//
// The backend assigns integer ids, but nothing in the client does
// arithmetic on them. `EntityId` keeps both shapes behind one type so a
// backend that switches to string keys keeps working.

use std::fmt;
use std::str::FromStr;

use pharmadesk_api::RecordId;
use serde::{Deserialize, Serialize};

/// Canonical identifier for any server-managed entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Text(String),
}

impl EntityId {
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Parse user input that must be a numeric id (form foreign keys).
    pub fn parse_numeric(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self::Numeric)
    }

    /// Path segment form used in `/api/{collection}/{id}`.
    pub fn as_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::parse_numeric(s).unwrap_or_else(|| Self::Text(s.trim().to_owned()))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<RecordId> for EntityId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Number(n) => Self::Numeric(n),
            RecordId::Text(s) => Self::from(s),
        }
    }
}

impl From<&EntityId> for RecordId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Numeric(n) => RecordId::Number(*n),
            EntityId::Text(s) => RecordId::Text(s.clone()),
        }
    }
}
