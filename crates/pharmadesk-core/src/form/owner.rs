// Owner form: name and surnames, identity card, contact.

use pharmadesk_api::{ApiClient, OwnerPayload};

use super::{FieldSpec, FormMode, FormSchema, FormValues};
use crate::error::CoreError;
use crate::model::{EntityId, Owner};

pub struct OwnerSchema;

impl FormSchema for OwnerSchema {
    type Record = Owner;
    type Payload = OwnerPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name"),
        FieldSpec::required("fistLastName", "First surname"),
        FieldSpec::optional("secondSurname", "Second surname"),
        FieldSpec::required("ci", "Identity card"),
        FieldSpec::required("cellphone", "Cellphone"),
        FieldSpec::optional("gmail", "E-mail"),
    ];

    fn prefill(owner: &Owner) -> Vec<(&'static str, String)> {
        vec![
            ("name", owner.name.clone()),
            ("fistLastName", owner.first_last_name.clone()),
            ("secondSurname", owner.second_surname.clone().unwrap_or_default()),
            ("ci", owner.ci.clone()),
            ("cellphone", owner.cellphone.clone()),
            ("gmail", owner.gmail.clone().unwrap_or_default()),
        ]
    }

    fn payload(values: &FormValues, _mode: &FormMode) -> Result<OwnerPayload, CoreError> {
        Ok(OwnerPayload {
            name: values.text("name"),
            first_last_name: values.text("fistLastName"),
            second_surname: values.optional("secondSurname"),
            ci: values.text("ci"),
            cellphone: values.text("cellphone"),
            gmail: values.optional_email("gmail")?,
        })
    }

    async fn create(api: &ApiClient, payload: &OwnerPayload) -> Result<Owner, CoreError> {
        Ok(api.create_owner(payload).await?.into())
    }

    async fn update(
        api: &ApiClient,
        id: &EntityId,
        payload: &OwnerPayload,
    ) -> Result<Owner, CoreError> {
        Ok(api.update_owner(&id.as_path(), payload).await?.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::Form;
    use pretty_assertions::assert_eq;

    fn sample() -> Owner {
        Owner {
            id: EntityId::Numeric(4),
            name: "Ana".into(),
            first_last_name: "Rojas".into(),
            second_surname: None,
            ci: "4455667".into(),
            cellphone: "70000000".into(),
            gmail: Some("ana@example.com".into()),
        }
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let form = Form::<OwnerSchema>::create();
        assert_eq!(
            form.missing_required(),
            vec!["name", "fistLastName", "ci", "cellphone"]
        );
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let mut form = Form::<OwnerSchema>::edit(&sample());
        form.set("ci", "   ").unwrap();
        assert_eq!(form.missing_required(), vec!["ci"]);
    }

    #[test]
    fn edit_prefills_and_keeps_id() {
        let form = Form::<OwnerSchema>::edit(&sample());
        assert_eq!(form.mode(), &FormMode::Edit(EntityId::Numeric(4)));
        assert_eq!(form.get("fistLastName"), "Rojas");
        assert_eq!(form.get("secondSurname"), "");
        assert!(form.missing_required().is_empty());
    }

    #[test]
    fn payload_sends_blank_optionals_as_null() {
        let mut form = Form::<OwnerSchema>::edit(&sample());
        form.set("gmail", "").unwrap();
        let payload = OwnerSchema::payload(form.values(), form.mode()).ok();
        assert_eq!(payload.and_then(|p| p.gmail), None);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut form = Form::<OwnerSchema>::create();
        assert!(matches!(
            form.set("nickname", "x"),
            Err(CoreError::UnknownField { .. })
        ));
    }
}
