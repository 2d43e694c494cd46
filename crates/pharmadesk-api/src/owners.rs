// Owner endpoints (`/api/duenios`)

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{OwnerPayload, OwnerRecord};

impl ApiClient {
    /// List all owners.
    ///
    /// `GET /api/duenios`
    pub async fn list_owners(&self) -> Result<Vec<OwnerRecord>, Error> {
        debug!("listing owners");
        self.get("duenios").await
    }

    /// `GET /api/duenios/{id}`
    pub async fn get_owner(&self, id: &str) -> Result<OwnerRecord, Error> {
        debug!(id, "fetching owner");
        self.get(&format!("duenios/{id}")).await
    }

    /// Create an owner. The server echoes the stored record.
    ///
    /// `POST /api/duenios`
    pub async fn create_owner(&self, body: &OwnerPayload) -> Result<OwnerRecord, Error> {
        debug!(name = %body.name, "creating owner");
        self.post("duenios", body).await
    }

    /// `PUT /api/duenios/{id}`
    pub async fn update_owner(&self, id: &str, body: &OwnerPayload) -> Result<OwnerRecord, Error> {
        debug!(id, "updating owner");
        self.put(&format!("duenios/{id}"), body).await
    }

    /// `DELETE /api/duenios/{id}`
    pub async fn delete_owner(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting owner");
        self.delete(&format!("duenios/{id}")).await
    }
}
