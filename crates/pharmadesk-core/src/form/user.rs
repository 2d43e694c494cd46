// User form. The password is required on create; on update a blank
// password is left out of the request so the backend keeps the old one.

use pharmadesk_api::{ApiClient, UserPayload};
use secrecy::ExposeSecret;

use super::{FieldSpec, FormMode, FormSchema, FormValues};
use crate::error::CoreError;
use crate::model::{EntityId, User};

pub struct UserSchema;

impl FormSchema for UserSchema {
    type Record = User;
    type Payload = UserPayload;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("username", "Username"),
        FieldSpec::required("password", "Password").secret_on_create(),
        FieldSpec::required("gmail", "E-mail"),
        FieldSpec::required("rol", "Role"),
    ];

    fn prefill(user: &User) -> Vec<(&'static str, String)> {
        vec![
            ("username", user.username.clone()),
            ("gmail", user.gmail.clone()),
            ("rol", user.rol.clone()),
        ]
    }

    fn payload(values: &FormValues, _mode: &FormMode) -> Result<UserPayload, CoreError> {
        let gmail = values
            .optional_email("gmail")?
            .ok_or_else(|| CoreError::invalid("gmail", "an e-mail address is required"))?;
        Ok(UserPayload {
            username: values.text("username"),
            password: values
                .secret("password")
                .map(|p| p.expose_secret().to_owned()),
            gmail,
            rol: values.text("rol"),
        })
    }

    async fn create(api: &ApiClient, payload: &UserPayload) -> Result<User, CoreError> {
        Ok(api.create_user(payload).await?.into())
    }

    async fn update(api: &ApiClient, id: &EntityId, payload: &UserPayload) -> Result<User, CoreError> {
        Ok(api.update_user(&id.as_path(), payload).await?.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::Form;

    fn sample() -> User {
        User {
            id: EntityId::Numeric(9),
            username: "maria".into(),
            gmail: "maria@example.com".into(),
            rol: "admin".into(),
        }
    }

    #[test]
    fn password_required_only_on_create() {
        let mut create = Form::<UserSchema>::create();
        for (field, value) in [("username", "maria"), ("gmail", "maria@example.com"), ("rol", "admin")] {
            create.set(field, value).unwrap();
        }
        assert_eq!(create.missing_required(), vec!["password"]);

        let edit = Form::<UserSchema>::edit(&sample());
        assert!(edit.missing_required().is_empty());
        assert_eq!(edit.get("password"), "");
    }

    #[test]
    fn blank_password_is_omitted_on_update() {
        let form = Form::<UserSchema>::edit(&sample());
        let payload = UserSchema::payload(form.values(), form.mode()).ok();
        assert_eq!(payload.map(|p| p.password), Some(None));
    }

    #[test]
    fn new_password_is_sent_on_update() {
        let mut form = Form::<UserSchema>::edit(&sample());
        form.set("password", "n3w-pass").unwrap();
        let payload = UserSchema::payload(form.values(), form.mode()).ok();
        assert_eq!(
            payload.and_then(|p| p.password).as_deref(),
            Some("n3w-pass")
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = Form::<UserSchema>::edit(&sample());
        form.set("gmail", "maria").unwrap();
        assert!(matches!(
            UserSchema::payload(form.values(), form.mode()),
            Err(CoreError::InvalidField { ref field, .. }) if field == "gmail"
        ));
    }
}
