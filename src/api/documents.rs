//! Document Endpoints

use acs_domain::{ApiRoute, Document, DocumentTarget};

use super::{ApiClient, ApiError, ApiResult};

pub async fn list_documents(api: &ApiClient, target: Option<&DocumentTarget>) -> ApiResult<Vec<Document>> {
    let mut query = Vec::new();
    if let Some(target) = target.filter(|t| t.is_set()) {
        query.push(("entity_type", target.entity_type.clone()));
        query.push(("entity_id", target.entity_id.to_string()));
    }
    let (docs, _) = api.list(&ApiRoute::Documents, &query).await?;
    Ok(docs)
}

pub async fn upload_document(api: &ApiClient, file: &web_sys::File, target: &DocumentTarget) -> ApiResult<Document> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Encode("form data unavailable".to_string()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Encode("could not attach file".to_string()))?;
    if target.is_set() {
        form.append_with_str("entity_type", &target.entity_type)
            .and_then(|_| form.append_with_str("entity_id", target.entity_id.as_str()))
            .map_err(|_| ApiError::Encode("could not attach target".to_string()))?;
    }
    tracing::info!(file = %file.name(), "uploading document");
    api.post_form(&ApiRoute::DocumentUpload, form).await
}
