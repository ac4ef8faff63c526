//! Installation Endpoints

use acs_domain::{ApiRoute, Installation, InstallationDraft, RecordId};

use super::{ApiClient, ApiResult};

pub async fn list_installations(api: &ApiClient) -> ApiResult<Vec<Installation>> {
    let (installations, _) = api.list(&ApiRoute::Installations, &[]).await?;
    Ok(installations)
}

pub async fn create_installation(api: &ApiClient, draft: &InstallationDraft) -> ApiResult<Installation> {
    draft.validate()?;
    api.post(&ApiRoute::Installations, draft).await
}

pub async fn update_installation(
    api: &ApiClient,
    id: &RecordId,
    draft: &InstallationDraft,
) -> ApiResult<Installation> {
    draft.validate()?;
    api.put(&ApiRoute::Installation(id.clone()), draft).await
}

pub async fn delete_installation(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Installation(id.clone())).await
}
