//! Upload Session Endpoints
//!
//! Batch imports under `/projects/{p}/subprojects/{s}/uploads`.

use acs_domain::{
    ApiRoute, CorrectionRequest, ProcessOutcome, ProcessRequest, RecordId, UploadAction, UploadRevertOutcome,
    UploadSession,
};

use super::{ApiClient, ApiError, ApiResult};

/// Project/subproject pair every upload route is nested under
#[derive(Debug, Clone, PartialEq)]
pub struct UploadScope {
    pub project: RecordId,
    pub subproject: RecordId,
}

impl UploadScope {
    fn sessions(&self) -> ApiRoute {
        ApiRoute::Uploads { project: self.project.clone(), subproject: self.subproject.clone() }
    }

    fn action(&self, upload: &RecordId, action: UploadAction) -> ApiRoute {
        ApiRoute::UploadAction {
            project: self.project.clone(),
            subproject: self.subproject.clone(),
            upload: upload.clone(),
            action,
        }
    }
}

pub async fn list_uploads(api: &ApiClient, scope: &UploadScope) -> ApiResult<Vec<UploadSession>> {
    let (sessions, _) = api.list(&scope.sessions(), &[]).await?;
    Ok(sessions)
}

/// Send the file as `multipart/form-data`; the server answers with the
/// validated session
pub async fn upload_file(api: &ApiClient, scope: &UploadScope, file: &web_sys::File) -> ApiResult<UploadSession> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Encode("form data unavailable".to_string()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Encode("could not attach file".to_string()))?;
    tracing::info!(file = %file.name(), size = file.size(), "uploading import file");
    api.post_form(&scope.sessions(), form).await
}

pub async fn correct_upload(
    api: &ApiClient,
    scope: &UploadScope,
    upload: &RecordId,
    corrections: &CorrectionRequest,
) -> ApiResult<UploadSession> {
    api.post(&scope.action(upload, UploadAction::Correct), corrections).await
}

pub async fn process_upload(
    api: &ApiClient,
    scope: &UploadScope,
    upload: &RecordId,
    request: ProcessRequest,
) -> ApiResult<ProcessOutcome> {
    api.post(&scope.action(upload, UploadAction::Process), &request).await
}

pub async fn revert_upload(api: &ApiClient, scope: &UploadScope, upload: &RecordId) -> ApiResult<UploadRevertOutcome> {
    api.post(&scope.action(upload, UploadAction::Revert), &serde_json::json!({})).await
}

/// Link for the browser to download the original file with row results
pub fn download_url(api: &ApiClient, scope: &UploadScope, upload: &RecordId) -> String {
    api.url(&scope.action(upload, UploadAction::Download))
}
