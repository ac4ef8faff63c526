//! Client Endpoints

use acs_domain::{ApiRoute, Client, ClientDraft, RecordId};

use super::{ApiClient, ApiResult};

pub async fn list_clients(api: &ApiClient) -> ApiResult<Vec<Client>> {
    let (clients, _) = api.list(&ApiRoute::Clients, &[]).await?;
    Ok(clients)
}

pub async fn get_client(api: &ApiClient, id: &RecordId) -> ApiResult<Client> {
    api.get(&ApiRoute::Client(id.clone())).await
}

pub async fn create_client(api: &ApiClient, draft: &ClientDraft) -> ApiResult<Client> {
    draft.validate()?;
    api.post(&ApiRoute::Clients, &draft.normalized()).await
}

pub async fn update_client(api: &ApiClient, id: &RecordId, draft: &ClientDraft) -> ApiResult<Client> {
    draft.validate()?;
    api.put(&ApiRoute::Client(id.clone()), &draft.normalized()).await
}

pub async fn delete_client(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Client(id.clone())).await
}
