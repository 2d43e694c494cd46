// ── Resource trait ──
//
// Ties a domain type to its collection endpoints so `ListPage` can be
// written once for owners, pharmacies, and users.

use std::future::Future;

use pharmadesk_api::ApiClient;

use crate::error::CoreError;
use crate::model::{EntityId, Owner, Pharmacy, User};

pub trait Resource: Clone + Send + Sync + 'static {
    /// Singular, lowercase noun used in messages ("owner").
    const KIND: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> &EntityId;

    /// Text shown in confirmations and matched by the list filter.
    fn display_name(&self) -> String;

    fn list(api: &ApiClient) -> impl Future<Output = Result<Vec<Self>, CoreError>> + Send;

    fn fetch(api: &ApiClient, id: &EntityId)
    -> impl Future<Output = Result<Self, CoreError>> + Send;

    fn delete(api: &ApiClient, id: &EntityId)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Re-tag a 404 as `NotFound` for this resource kind.
fn not_found<R: Resource>(id: &EntityId, err: pharmadesk_api::Error) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            entity_type: R::KIND.to_owned(),
            identifier: id.to_string(),
        }
    } else {
        err.into()
    }
}

impl Resource for Owner {
    const KIND: &'static str = "owner";
    const PLURAL: &'static str = "owners";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    async fn list(api: &ApiClient) -> Result<Vec<Self>, CoreError> {
        let records = api.list_owners().await?;
        Ok(records.into_iter().map(Self::from).collect())
    }

    async fn fetch(api: &ApiClient, id: &EntityId) -> Result<Self, CoreError> {
        api.get_owner(&id.as_path())
            .await
            .map(Self::from)
            .map_err(|e| not_found::<Self>(id, e))
    }

    async fn delete(api: &ApiClient, id: &EntityId) -> Result<(), CoreError> {
        api.delete_owner(&id.as_path())
            .await
            .map_err(|e| not_found::<Self>(id, e))
    }
}

impl Resource for Pharmacy {
    const KIND: &'static str = "pharmacy";
    const PLURAL: &'static str = "pharmacies";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    async fn list(api: &ApiClient) -> Result<Vec<Self>, CoreError> {
        let records = api.list_pharmacies().await?;
        Ok(records.into_iter().map(Self::from).collect())
    }

    async fn fetch(api: &ApiClient, id: &EntityId) -> Result<Self, CoreError> {
        api.get_pharmacy(&id.as_path())
            .await
            .map(Self::from)
            .map_err(|e| not_found::<Self>(id, e))
    }

    async fn delete(api: &ApiClient, id: &EntityId) -> Result<(), CoreError> {
        api.delete_pharmacy(&id.as_path())
            .await
            .map_err(|e| not_found::<Self>(id, e))
    }
}

impl Resource for User {
    const KIND: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> String {
        self.username.clone()
    }

    async fn list(api: &ApiClient) -> Result<Vec<Self>, CoreError> {
        let records = api.list_users().await?;
        Ok(records.into_iter().map(Self::from).collect())
    }

    async fn fetch(api: &ApiClient, id: &EntityId) -> Result<Self, CoreError> {
        api.get_user(&id.as_path())
            .await
            .map(Self::from)
            .map_err(|e| not_found::<Self>(id, e))
    }

    async fn delete(api: &ApiClient, id: &EntityId) -> Result<(), CoreError> {
        api.delete_user(&id.as_path())
            .await
            .map_err(|e| not_found::<Self>(id, e))
    }
}

/// Server-side pharmacy name search (`/api/farmacias/filtradas`).
pub async fn search_pharmacies(api: &ApiClient, filter: &str) -> Result<Vec<Pharmacy>, CoreError> {
    let records = api.search_pharmacies(filter).await?;
    Ok(records.into_iter().map(Pharmacy::from).collect())
}
