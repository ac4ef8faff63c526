//! User Administration Endpoints

use acs_domain::{ApiRoute, RecordId, User, UserDraft};

use super::{ApiClient, ApiResult};

pub async fn list_users(api: &ApiClient) -> ApiResult<Vec<User>> {
    let (users, _) = api.list(&ApiRoute::Users, &[]).await?;
    Ok(users)
}

pub async fn create_user(api: &ApiClient, draft: &UserDraft) -> ApiResult<User> {
    draft.validate()?;
    api.post(&ApiRoute::Users, draft).await
}

pub async fn update_user(api: &ApiClient, id: &RecordId, draft: &UserDraft) -> ApiResult<User> {
    draft.validate()?;
    api.put(&ApiRoute::User(id.clone()), draft).await
}

pub async fn delete_user(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::User(id.clone())).await
}
