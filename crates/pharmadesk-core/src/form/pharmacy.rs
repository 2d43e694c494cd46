// ── Pharmacy form ──
//
// The largest form: registry data, a map-picked location, opening hours,
// sector, four mandatory foreign keys, an optional controlled-substance
// license, and an optional photo. Opening the form loads the five
// reference lists concurrently; foreign keys can then be given by id or
// by name.

use std::path::Path;
use std::str::FromStr;

use pharmadesk_api::{ApiClient, PharmacyPayload, RecordId};
use tracing::debug;

use super::image;
use super::location::{GeoPoint, LocationPicker};
use super::{FieldSpec, Form, FormMode, FormSchema, FormValues, SubmitOutcome};
use crate::error::CoreError;
use crate::model::{EntityId, OpeningHours, Owner, Pharmacy, Reference, SectorType, User, reference};
use crate::resource::Resource;

pub struct PharmacySchema;

impl FormSchema for PharmacySchema {
    type Record = Pharmacy;
    type Payload = PharmacyPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Pharmacy name"),
        FieldSpec::required("recordNumber", "Record number"),
        FieldSpec::required("address", "Address"),
        FieldSpec::required("latitude", "Latitude"),
        FieldSpec::required("longitude", "Longitude"),
        FieldSpec::required("businessName", "Business name"),
        FieldSpec::required("nit", "NIT"),
        FieldSpec::required("Zone_id", "Zone"),
        FieldSpec::required("Owner_id", "Owner"),
        FieldSpec::required("Code_id", "Code"),
        FieldSpec::required("User_id", "User"),
        FieldSpec::optional("ControlledSubstances_id", "Controlled substances"),
        FieldSpec::optional("openingHours", "Opening hours").with_default("8"),
        FieldSpec::optional("sectorType", "Sector").with_default("0"),
        FieldSpec::optional("image", "Photo"),
    ];

    fn prefill(p: &Pharmacy) -> Vec<(&'static str, String)> {
        let id_text = |id: Option<&EntityId>| id.map(ToString::to_string).unwrap_or_default();
        vec![
            ("name", p.name.clone()),
            ("recordNumber", p.record_number.clone()),
            ("address", p.address.clone()),
            ("latitude", p.latitude.map(|v| v.to_string()).unwrap_or_default()),
            ("longitude", p.longitude.map(|v| v.to_string()).unwrap_or_default()),
            ("businessName", p.business_name.clone()),
            ("nit", p.nit.clone()),
            ("Zone_id", id_text(p.zone_id.as_ref())),
            ("Owner_id", id_text(p.owner_id.as_ref())),
            ("Code_id", id_text(p.code_id.as_ref())),
            ("User_id", id_text(p.user_id.as_ref())),
            ("ControlledSubstances_id", id_text(p.controlled_substance_id.as_ref())),
            ("openingHours", p.stored_opening_hours().to_string()),
            ("sectorType", p.stored_sector_type().to_string()),
            ("image", p.image.clone().unwrap_or_default()),
        ]
    }

    fn payload(values: &FormValues, _mode: &FormMode) -> Result<PharmacyPayload, CoreError> {
        let location = GeoPoint::new(values.number("latitude")?, values.number("longitude")?)?;

        let opening_hours = values
            .integer("openingHours")
            .ok()
            .and_then(OpeningHours::from_hours)
            .ok_or_else(|| CoreError::invalid("openingHours", "must be 8 or 12"))?;

        let sector_raw = values.text("sectorType");
        let sector_type = sector_raw
            .parse::<i64>()
            .ok()
            .and_then(SectorType::from_code)
            .or_else(|| SectorType::from_str(&sector_raw).ok())
            .ok_or_else(|| CoreError::invalid("sectorType", "must be 0 (private) or 1 (public)"))?;

        // Attached photos are encoded by `attach_image`; a stored value goes
        // back as the server gave it.
        let image = values.optional("image");

        let fk = |name: &str| values.id(name).map(|id| RecordId::from(&id));

        Ok(PharmacyPayload {
            name: values.text("name"),
            record_number: values.text("recordNumber"),
            address: values.text("address"),
            latitude: location.lat,
            longitude: location.lng,
            business_name: values.text("businessName"),
            nit: values.text("nit"),
            opening_hours: opening_hours.hours(),
            sector_type: sector_type.code(),
            zone_id: fk("Zone_id")?,
            owner_id: fk("Owner_id")?,
            code_id: fk("Code_id")?,
            user_id: fk("User_id")?,
            controlled_substances_id: values
                .optional_id("ControlledSubstances_id")?
                .map(|id| RecordId::from(&id)),
            image,
        })
    }

    async fn create(api: &ApiClient, payload: &PharmacyPayload) -> Result<Pharmacy, CoreError> {
        Ok(api.create_pharmacy(payload).await?.into())
    }

    async fn update(
        api: &ApiClient,
        id: &EntityId,
        payload: &PharmacyPayload,
    ) -> Result<Pharmacy, CoreError> {
        Ok(api.update_pharmacy(&id.as_path(), payload).await?.into())
    }
}

// ── Reference lists ────────────────────────────────────────────────

/// Choices for the pharmacy form's foreign-key fields.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLists {
    pub zones: Vec<Reference>,
    pub owners: Vec<Owner>,
    pub codes: Vec<Reference>,
    pub substances: Vec<Reference>,
    pub users: Vec<User>,
}

impl ReferenceLists {
    /// Fetch all five lists concurrently. Any failure fails the whole load.
    pub async fn load(api: &ApiClient) -> Result<Self, CoreError> {
        let (zones, owners, codes, substances, users) = tokio::try_join!(
            api.list_zones(),
            api.list_owners(),
            api.list_codes(),
            api.list_substances(),
            api.list_users(),
        )?;

        debug!(
            zones = zones.len(),
            owners = owners.len(),
            codes = codes.len(),
            substances = substances.len(),
            users = users.len(),
            "pharmacy form references loaded"
        );

        Ok(Self {
            zones: zones.into_iter().map(Reference::from).collect(),
            owners: owners.into_iter().map(Owner::from).collect(),
            codes: codes.into_iter().map(Reference::from).collect(),
            substances: substances.into_iter().map(Reference::from).collect(),
            users: users.into_iter().map(User::from).collect(),
        })
    }

    /// Resolve a foreign-key field value given as an id or a display name.
    fn resolve(&self, field: &str, input: &str) -> Result<EntityId, CoreError> {
        let not_found = || CoreError::invalid(field, format!("no match for {input:?}"));
        let by_id = EntityId::from(input);

        let found = match field {
            "Zone_id" => reference::lookup(&self.zones, input).map(|r| r.id.clone()),
            "Code_id" => reference::lookup(&self.codes, input).map(|r| r.id.clone()),
            "ControlledSubstances_id" => {
                reference::lookup(&self.substances, input).map(|r| r.id.clone())
            }
            "Owner_id" => self
                .owners
                .iter()
                .find(|o| o.id == by_id)
                .or_else(|| {
                    self.owners
                        .iter()
                        .find(|o| o.full_name().eq_ignore_ascii_case(input.trim()))
                })
                .map(|o| o.id.clone()),
            "User_id" => self
                .users
                .iter()
                .find(|u| u.id == by_id || u.username.eq_ignore_ascii_case(input.trim()))
                .map(|u| u.id.clone()),
            _ => {
                return Err(CoreError::UnknownField {
                    field: field.to_owned(),
                });
            }
        };
        found.ok_or_else(not_found)
    }
}

const REFERENCE_FIELDS: [&str; 5] = ["Zone_id", "Owner_id", "Code_id", "User_id", "ControlledSubstances_id"];

// ── Pharmacy form with map and references ──────────────────────────

pub struct PharmacyForm {
    form: Form<PharmacySchema>,
    picker: LocationPicker,
    references: ReferenceLists,
}

impl PharmacyForm {
    /// Open a create form (`id = None`) or an edit form for `id`.
    ///
    /// Edit mode pre-fills from `GET /api/farmacias/{id}` and positions
    /// the marker on the stored coordinates.
    pub async fn open(api: &ApiClient, id: Option<&EntityId>) -> Result<Self, CoreError> {
        let references = ReferenceLists::load(api).await?;

        let (form, picker) = match id {
            None => (Form::create(), LocationPicker::new()),
            Some(id) => {
                let pharmacy = Pharmacy::fetch(api, id).await?;
                let picker = LocationPicker::at(pharmacy.location());
                (Form::edit(&pharmacy), picker)
            }
        };

        Ok(Self::from_parts(form, picker, references))
    }

    pub fn from_parts(
        form: Form<PharmacySchema>,
        picker: LocationPicker,
        references: ReferenceLists,
    ) -> Self {
        Self {
            form,
            picker,
            references,
        }
    }

    pub fn form(&self) -> &Form<PharmacySchema> {
        &self.form
    }

    pub fn picker(&self) -> &LocationPicker {
        &self.picker
    }

    pub fn references(&self) -> &ReferenceLists {
        &self.references
    }

    /// Map click: place the marker and copy its coordinates into the form.
    pub fn pick(&mut self, point: GeoPoint) -> Result<(), CoreError> {
        let point = self.picker.pick(point)?;
        self.write_coordinates(point)
    }

    /// Marker drag end: move the marker and update both coordinates.
    pub fn drag_to(&mut self, point: GeoPoint) -> Result<(), CoreError> {
        let point = self.picker.drag_to(point)?;
        self.write_coordinates(point)
    }

    fn write_coordinates(&mut self, point: GeoPoint) -> Result<(), CoreError> {
        let (lat, lng) = point.to_field_text();
        self.form.set("latitude", lat)?;
        self.form.set("longitude", lng)
    }

    /// Set a field. Foreign keys accept an id or a name from the loaded
    /// reference lists; typed coordinates move the marker once both parse.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let value = value.into();

        if REFERENCE_FIELDS.contains(&field) && !value.trim().is_empty() {
            let id = self.references.resolve(field, &value)?;
            return self.form.set(field, id.to_string());
        }

        self.form.set(field, value)?;

        if field == "latitude" || field == "longitude" {
            let values = self.form.values();
            if let (Ok(lat), Ok(lng)) = (values.number("latitude"), values.number("longitude")) {
                if let Ok(point) = GeoPoint::new(lat, lng) {
                    self.picker = LocationPicker::at(Some(point));
                }
            }
        }
        Ok(())
    }

    /// Attach a photo from disk (max 5 MiB).
    pub fn attach_image(&mut self, path: &Path) -> Result<(), CoreError> {
        let url = image::encode_file(path)?;
        self.form.set("image", url)
    }

    pub fn clear_image(&mut self) -> Result<(), CoreError> {
        self.form.set("image", "")
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        self.form.missing_required()
    }

    pub fn error(&self) -> Option<&str> {
        self.form.error()
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<SubmitOutcome<Pharmacy>, CoreError> {
        self.form.submit(api).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn references() -> ReferenceLists {
        ReferenceLists {
            zones: vec![Reference { id: EntityId::Numeric(2), name: "Norte".into() }],
            owners: vec![Owner {
                id: EntityId::Numeric(5),
                name: "Ana".into(),
                first_last_name: "Rojas".into(),
                second_surname: None,
                ci: "1".into(),
                cellphone: "2".into(),
                gmail: None,
            }],
            codes: vec![Reference { id: EntityId::Numeric(1), name: "A1".into() }],
            substances: vec![],
            users: vec![User {
                id: EntityId::Numeric(9),
                username: "maria".into(),
                gmail: "maria@example.com".into(),
                rol: "admin".into(),
            }],
        }
    }

    fn filled() -> PharmacyForm {
        let mut f = PharmacyForm::from_parts(Form::create(), LocationPicker::new(), references());
        for (field, value) in [
            ("name", "Farmacia Central"),
            ("recordNumber", "1042"),
            ("address", "Av. Busch 120"),
            ("businessName", "Central SRL"),
            ("nit", "123456789"),
            ("Zone_id", "Norte"),
            ("Owner_id", "Ana Rojas"),
            ("Code_id", "1"),
            ("User_id", "maria"),
        ] {
            f.set(field, value).unwrap();
        }
        f
    }

    #[test]
    fn defaults_are_eight_hours_private() {
        let form = Form::<PharmacySchema>::create();
        assert_eq!(form.get("openingHours"), "8");
        assert_eq!(form.get("sectorType"), "0");
    }

    #[test]
    fn never_picking_fails_required_validation() {
        let f = filled();
        assert_eq!(f.missing_required(), vec!["latitude", "longitude"]);
    }

    #[test]
    fn pick_then_drag_sets_both_coordinates() {
        let mut f = filled();
        f.pick(GeoPoint { lat: -17.78, lng: -63.18 }).unwrap();
        assert_eq!(f.form().get("latitude"), "-17.78");
        assert_eq!(f.form().get("longitude"), "-63.18");

        f.drag_to(GeoPoint { lat: -17.8, lng: -63.25 }).unwrap();
        assert_eq!(f.form().get("latitude"), "-17.8");
        assert_eq!(f.form().get("longitude"), "-63.25");
        assert!(f.missing_required().is_empty());
    }

    #[test]
    fn references_resolve_by_name_or_id() {
        let f = filled();
        assert_eq!(f.form().get("Zone_id"), "2");
        assert_eq!(f.form().get("Owner_id"), "5");
        assert_eq!(f.form().get("Code_id"), "1");
        assert_eq!(f.form().get("User_id"), "9");
    }

    #[test]
    fn unknown_reference_is_rejected() {
        let mut f = filled();
        assert!(matches!(
            f.set("Zone_id", "Centro"),
            Err(CoreError::InvalidField { ref field, .. }) if field == "Zone_id"
        ));
    }

    #[test]
    fn payload_coerces_numbers_and_nulls_empty_substance() {
        let mut f = filled();
        f.pick(GeoPoint { lat: -17.78, lng: -63.18 }).unwrap();
        f.set("openingHours", "12").unwrap();
        f.set("sectorType", "public").unwrap();

        let p = PharmacySchema::payload(f.form().values(), f.form().mode()).unwrap();
        assert_eq!(p.opening_hours, 12);
        assert_eq!(p.sector_type, 1);
        assert_eq!(p.zone_id, RecordId::Number(2));
        assert_eq!(p.controlled_substances_id, None);

        let body = serde_json::to_value(&p).unwrap();
        assert!(body["ControlledSubstances_id"].is_null());
        assert_eq!(body["Owner_id"], 5);
    }

    #[test]
    fn typed_coordinates_are_validated_and_move_marker() {
        let mut f = filled();
        f.set("latitude", "-17.7").unwrap();
        f.set("longitude", "-63.1").unwrap();
        assert_eq!(f.picker().point(), Some(GeoPoint { lat: -17.7, lng: -63.1 }));

        f.set("latitude", "north").unwrap();
        assert!(matches!(
            PharmacySchema::payload(f.form().values(), f.form().mode()),
            Err(CoreError::InvalidField { ref field, .. }) if field == "latitude"
        ));
    }

    #[test]
    fn bad_opening_hours_is_rejected() {
        let mut f = filled();
        f.pick(GeoPoint { lat: 0.0, lng: 0.0 }).unwrap();
        f.set("openingHours", "24").unwrap();
        assert!(PharmacySchema::payload(f.form().values(), f.form().mode()).is_err());
    }
}
