// Reference list endpoints: zones, pharmacy codes, controlled substances.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ReferenceRecord;

impl ApiClient {
    /// `GET /api/zonas`
    pub async fn list_zones(&self) -> Result<Vec<ReferenceRecord>, Error> {
        debug!("listing zones");
        self.get("zonas").await
    }

    /// `GET /api/codigos`
    pub async fn list_codes(&self) -> Result<Vec<ReferenceRecord>, Error> {
        debug!("listing pharmacy codes");
        self.get("codigos").await
    }

    /// `GET /api/sustancias`
    pub async fn list_substances(&self) -> Result<Vec<ReferenceRecord>, Error> {
        debug!("listing controlled substances");
        self.get("sustancias").await
    }
}
