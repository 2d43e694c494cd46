// ── Pharmacy domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::EntityId;
use crate::form::location::GeoPoint;

/// Daily opening span. The backend stores the hour count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum OpeningHours {
    #[default]
    #[strum(serialize = "8")]
    Eight,
    #[strum(serialize = "12")]
    Twelve,
}

impl OpeningHours {
    pub fn hours(self) -> i64 {
        match self {
            Self::Eight => 8,
            Self::Twelve => 12,
        }
    }

    pub fn from_hours(hours: i64) -> Option<Self> {
        match hours {
            8 => Some(Self::Eight),
            12 => Some(Self::Twelve),
            _ => None,
        }
    }
}

/// Ownership sector. Wire codes: 0 private, 1 public.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SectorType {
    #[default]
    Private,
    Public,
}

impl SectorType {
    pub fn code(self) -> i64 {
        match self {
            Self::Private => 0,
            Self::Public => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Private),
            1 => Some(Self::Public),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: EntityId,
    pub name: String,
    pub record_number: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub business_name: String,
    pub nit: String,
    pub opening_hours: OpeningHours,
    pub sector_type: SectorType,
    /// Codes exactly as stored; they differ from the enums above only when
    /// the server holds a value outside the known set.
    #[serde(skip)]
    pub opening_hours_code: Option<i64>,
    #[serde(skip)]
    pub sector_type_code: Option<i64>,
    pub zone_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub code_id: Option<EntityId>,
    pub user_id: Option<EntityId>,
    pub controlled_substance_id: Option<EntityId>,
    /// A `data:` URL for attached photos, or whatever link the server stores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Display-only, joined in by the list endpoint.
    pub zone_name: Option<String>,
    pub owner_name: Option<String>,
}

impl Pharmacy {
    /// Stored coordinates, when both are present.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }

    /// Stored opening-hours code, falling back to the displayed value.
    pub fn stored_opening_hours(&self) -> i64 {
        self.opening_hours_code.unwrap_or_else(|| self.opening_hours.hours())
    }

    /// Stored sector code, falling back to the displayed value.
    pub fn stored_sector_type(&self) -> i64 {
        self.sector_type_code.unwrap_or_else(|| self.sector_type.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_hours_parse_from_hour_strings() {
        assert_eq!("12".parse::<OpeningHours>().ok(), Some(OpeningHours::Twelve));
        assert_eq!(OpeningHours::Eight.to_string(), "8");
        assert!(OpeningHours::from_hours(24).is_none());
    }

    #[test]
    fn sector_type_codes() {
        assert_eq!(SectorType::from_code(1), Some(SectorType::Public));
        assert_eq!(SectorType::Private.code(), 0);
        assert_eq!("PUBLIC".parse::<SectorType>().ok(), Some(SectorType::Public));
    }
}
