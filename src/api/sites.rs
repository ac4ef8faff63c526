//! Site Endpoints

use acs_domain::{ApiRoute, RecordId, Site, SiteDraft};

use super::{ApiClient, ApiResult};

pub async fn list_sites(api: &ApiClient, project: &RecordId, subproject: &RecordId) -> ApiResult<Vec<Site>> {
    let route = ApiRoute::Sites { project: project.clone(), subproject: subproject.clone() };
    let (sites, _) = api.list(&route, &[]).await?;
    Ok(sites)
}

pub async fn create_site(
    api: &ApiClient,
    project: &RecordId,
    subproject: &RecordId,
    draft: &SiteDraft,
) -> ApiResult<Site> {
    draft.validate()?;
    let route = ApiRoute::Sites { project: project.clone(), subproject: subproject.clone() };
    api.post(&route, draft).await
}

pub async fn update_site(api: &ApiClient, id: &RecordId, draft: &SiteDraft) -> ApiResult<Site> {
    draft.validate()?;
    api.put(&ApiRoute::Site(id.clone()), draft).await
}

pub async fn delete_site(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Site(id.clone())).await
}
