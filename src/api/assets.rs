//! Asset Endpoints

use acs_domain::{wire_name, AcsAsset, ApiRoute, AssetDraft, AssetStatus, RecordId};

use super::{ApiClient, ApiResult};

pub async fn list_assets(api: &ApiClient, status: Option<AssetStatus>) -> ApiResult<Vec<AcsAsset>> {
    let mut query = Vec::new();
    if let Some(status) = status {
        query.push(("status", wire_name(&status)));
    }
    let (assets, _) = api.list(&ApiRoute::Assets, &query).await?;
    Ok(assets)
}

pub async fn list_subproject_assets(api: &ApiClient, subproject: &RecordId) -> ApiResult<Vec<AcsAsset>> {
    let (assets, _) = api
        .list::<AcsAsset>(&ApiRoute::Assets, &[("subproject_id", subproject.to_string())])
        .await?;
    Ok(assets
        .into_iter()
        .filter(|a| a.subproject_id.as_ref() == Some(subproject))
        .collect())
}

pub async fn create_asset(api: &ApiClient, draft: &AssetDraft) -> ApiResult<AcsAsset> {
    draft.validate()?;
    api.post(&ApiRoute::Assets, draft).await
}

pub async fn update_asset(api: &ApiClient, id: &RecordId, draft: &AssetDraft) -> ApiResult<AcsAsset> {
    draft.validate()?;
    api.put(&ApiRoute::Asset(id.clone()), draft).await
}

pub async fn delete_asset(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Asset(id.clone())).await
}
