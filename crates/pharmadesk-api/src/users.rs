// Console user endpoints (`/api/usuarios`)

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{UserPayload, UserRecord};

impl ApiClient {
    /// `GET /api/usuarios`
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        debug!("listing users");
        self.get("usuarios").await
    }

    /// `GET /api/usuarios/{id}`
    pub async fn get_user(&self, id: &str) -> Result<UserRecord, Error> {
        debug!(id, "fetching user");
        self.get(&format!("usuarios/{id}")).await
    }

    /// `POST /api/usuarios`
    pub async fn create_user(&self, body: &UserPayload) -> Result<UserRecord, Error> {
        debug!(username = %body.username, "creating user");
        self.post("usuarios", body).await
    }

    /// Update a user. A `None` password leaves the stored one untouched.
    ///
    /// `PUT /api/usuarios/{id}`
    pub async fn update_user(&self, id: &str, body: &UserPayload) -> Result<UserRecord, Error> {
        debug!(id, password_change = body.password.is_some(), "updating user");
        self.put(&format!("usuarios/{id}"), body).await
    }

    /// `DELETE /api/usuarios/{id}`
    pub async fn delete_user(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting user");
        self.delete(&format!("usuarios/{id}")).await
    }
}
