// ── Map point picker for the pharmacy form ──
//
// Holds at most one marker. A click (`pick`) or a marker drag (`drag_to`)
// replaces it; the owning form copies the coordinates into its latitude
// and longitude fields. Nothing here outlives the form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Map center used when no marker has been placed (Santa Cruz de la Sierra).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: -17.7833,
    lng: -63.1821,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Validated point: finite, latitude within ±90, longitude within ±180.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::invalid(
                "latitude",
                format!("{lat} is outside -90..=90"),
            ));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::invalid(
                "longitude",
                format!("{lng} is outside -180..=180"),
            ));
        }
        Ok(Self { lat, lng })
    }

    /// `(latitude, longitude)` as the strings the form fields hold.
    pub fn to_field_text(self) -> (String, String) {
        (self.lat.to_string(), self.lng.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationPicker {
    point: Option<GeoPoint>,
}

impl LocationPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picker pre-positioned at a stored location (edit mode).
    pub fn at(point: Option<GeoPoint>) -> Self {
        Self { point }
    }

    /// Place the marker where the map was clicked.
    pub fn pick(&mut self, point: GeoPoint) -> Result<GeoPoint, CoreError> {
        self.place(point)
    }

    /// Move the marker after a drag ends.
    pub fn drag_to(&mut self, point: GeoPoint) -> Result<GeoPoint, CoreError> {
        self.place(point)
    }

    fn place(&mut self, point: GeoPoint) -> Result<GeoPoint, CoreError> {
        let point = GeoPoint::new(point.lat, point.lng)?;
        self.point = Some(point);
        Ok(point)
    }

    pub fn point(&self) -> Option<GeoPoint> {
        self.point
    }

    /// Where the map should be centered.
    pub fn center(&self) -> GeoPoint {
        self.point.unwrap_or(DEFAULT_CENTER)
    }
}
