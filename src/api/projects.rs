//! Project and Subproject Endpoints

use acs_domain::{
    wire_name, ApiRoute, Project, ProjectDraft, ProjectStatus, RecordId, Subproject, SubprojectDraft,
    SubprojectUpdate,
};

use super::{ApiClient, ApiResult};

pub async fn list_projects(api: &ApiClient, status: Option<ProjectStatus>) -> ApiResult<Vec<Project>> {
    let mut query = Vec::new();
    if let Some(status) = status {
        query.push(("status", wire_name(&status)));
    }
    let (projects, _) = api.list(&ApiRoute::Projects, &query).await?;
    Ok(projects)
}

/// Projects of one client; filtered server-side when supported, and again here
pub async fn list_client_projects(api: &ApiClient, client_id: &RecordId) -> ApiResult<Vec<Project>> {
    let (projects, _) = api
        .list::<Project>(&ApiRoute::Projects, &[("client_id", client_id.to_string())])
        .await?;
    Ok(projects.into_iter().filter(|p| p.client_id == *client_id).collect())
}

pub async fn get_project(api: &ApiClient, id: &RecordId) -> ApiResult<Project> {
    api.get(&ApiRoute::Project(id.clone())).await
}

pub async fn create_project(api: &ApiClient, draft: &ProjectDraft) -> ApiResult<Project> {
    draft.validate()?;
    api.post(&ApiRoute::Projects, draft).await
}

pub async fn update_project(api: &ApiClient, id: &RecordId, draft: &ProjectDraft) -> ApiResult<Project> {
    draft.validate()?;
    api.put(&ApiRoute::Project(id.clone()), draft).await
}

pub async fn delete_project(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Project(id.clone())).await
}

pub async fn list_subprojects(api: &ApiClient, project: &RecordId) -> ApiResult<Vec<Subproject>> {
    let (subprojects, _) = api
        .list(&ApiRoute::Subprojects { project: project.clone() }, &[])
        .await?;
    Ok(subprojects)
}

pub async fn get_subproject(api: &ApiClient, project: &RecordId, subproject: &RecordId) -> ApiResult<Subproject> {
    api.get(&ApiRoute::Subproject { project: project.clone(), subproject: subproject.clone() })
        .await
}

/// The configuration is sent once, here, and never again
pub async fn create_subproject(
    api: &ApiClient,
    project: &RecordId,
    draft: &SubprojectDraft,
) -> ApiResult<Subproject> {
    draft.validate()?;
    api.post(&ApiRoute::Subprojects { project: project.clone() }, draft).await
}

pub async fn update_subproject(
    api: &ApiClient,
    project: &RecordId,
    subproject: &RecordId,
    update: &SubprojectUpdate,
) -> ApiResult<Subproject> {
    update.validate()?;
    api.put(
        &ApiRoute::Subproject { project: project.clone(), subproject: subproject.clone() },
        update,
    )
    .await
}

pub async fn delete_subproject(api: &ApiClient, project: &RecordId, subproject: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Subproject { project: project.clone(), subproject: subproject.clone() })
        .await
}
