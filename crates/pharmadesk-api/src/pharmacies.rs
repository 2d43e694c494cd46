// Pharmacy endpoints (`/api/farmacias`)
//
// The list endpoint joins in `zone_name` / `owner_name` for display; the
// single-record endpoint returns the bare row used to pre-fill the form.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PharmacyPayload, PharmacyRecord};

impl ApiClient {
    /// `GET /api/farmacias`
    pub async fn list_pharmacies(&self) -> Result<Vec<PharmacyRecord>, Error> {
        debug!("listing pharmacies");
        self.get("farmacias").await
    }

    /// Server-side name filter.
    ///
    /// `GET /api/farmacias/filtradas?filtro=...`
    pub async fn search_pharmacies(&self, filter: &str) -> Result<Vec<PharmacyRecord>, Error> {
        debug!(filter, "searching pharmacies");
        self.get_with_params("farmacias/filtradas", &[("filtro", filter.to_owned())])
            .await
    }

    /// `GET /api/farmacias/{id}`
    pub async fn get_pharmacy(&self, id: &str) -> Result<PharmacyRecord, Error> {
        debug!(id, "fetching pharmacy");
        self.get(&format!("farmacias/{id}")).await
    }

    /// `POST /api/farmacias`
    pub async fn create_pharmacy(&self, body: &PharmacyPayload) -> Result<PharmacyRecord, Error> {
        debug!(name = %body.name, "creating pharmacy");
        self.post("farmacias", body).await
    }

    /// `PUT /api/farmacias/{id}`
    pub async fn update_pharmacy(
        &self,
        id: &str,
        body: &PharmacyPayload,
    ) -> Result<PharmacyRecord, Error> {
        debug!(id, "updating pharmacy");
        self.put(&format!("farmacias/{id}"), body).await
    }

    /// `DELETE /api/farmacias/{id}`
    pub async fn delete_pharmacy(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting pharmacy");
        self.delete(&format!("farmacias/{id}")).await
    }
}
