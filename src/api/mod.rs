//! REST Client
//!
//! Typed wrappers over the backend's REST endpoints, organized by domain.
//! Every call goes through [`ApiClient`], which joins routes onto the
//! configured base URL and maps failures into [`ApiError`].

mod assets;
mod audit;
mod clients;
mod documents;
mod finance;
mod installations;
mod maintenance;
mod projects;
mod sites;
mod uploads;
mod users;

use acs_domain::{ApiConfig, ApiRoute, DomainError, ListResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use assets::*;
pub use audit::*;
pub use clients::*;
pub use documents::*;
pub use finance::*;
pub use installations::*;
pub use maintenance::*;
pub use projects::*;
pub use sites::*;
pub use uploads::*;
pub use users::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Could not encode request: {0}")]
    Encode(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Human readable message for a failed response. Backends answer with
/// `{"message"}`, `{"error"}` or `{"detail"}`; anything else falls back to
/// the status text.
pub fn error_message(status: u16, status_text: &str, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => return s.trim().to_string(),
                // Validation errors as a list of {"msg": ...}
                Some(serde_json::Value::Array(items)) => {
                    let msgs: Vec<&str> = items
                        .iter()
                        .filter_map(|item| item.get("msg").or_else(|| item.get("message")))
                        .filter_map(|m| m.as_str())
                        .collect();
                    if !msgs.is_empty() {
                        return msgs.join("; ");
                    }
                }
                _ => {}
            }
        }
    }
    if status_text.trim().is_empty() {
        format!("Request failed with status {}", status)
    } else {
        format!("{} ({})", status_text.trim(), status)
    }
}

/// Decode a success body; an empty body reads as JSON `null` so `()` works
fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL of a route, for links the browser opens directly
    pub fn url(&self, route: &ApiRoute) -> String {
        self.config.url(&route.path())
    }

    fn query_url(&self, route: &ApiRoute, query: &[(&str, String)]) -> String {
        self.config.url(&route.with_query(query))
    }

    pub async fn get<T: DeserializeOwned>(&self, route: &ApiRoute) -> ApiResult<T> {
        let request = Request::get(&self.url(route)).build().map_err(|e| ApiError::Encode(e.to_string()))?;
        read_json(send(request, "GET", route).await?).await
    }

    /// List endpoint with optional filters; accepts a bare array or a page
    /// envelope and returns the items plus the reported total
    pub async fn list<T: DeserializeOwned>(
        &self,
        route: &ApiRoute,
        query: &[(&str, String)],
    ) -> ApiResult<(Vec<T>, usize)> {
        let request = Request::get(&self.query_url(route, query))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let page: ListResponse<T> = read_json(send(request, "GET", route).await?).await?;
        Ok(page.into_parts())
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, route: &ApiRoute, body: &B) -> ApiResult<T> {
        let request = with_json(Request::post(&self.url(route)), body)?;
        read_json(send(request, "POST", route).await?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, route: &ApiRoute, body: &B) -> ApiResult<T> {
        let request = with_json(Request::put(&self.url(route)), body)?;
        read_json(send(request, "PUT", route).await?).await
    }

    /// DELETE; whatever the server answers with on success is ignored
    pub async fn delete(&self, route: &ApiRoute) -> ApiResult<()> {
        let request = Request::delete(&self.url(route)).build().map_err(|e| ApiError::Encode(e.to_string()))?;
        send(request, "DELETE", route).await?;
        Ok(())
    }

    /// `multipart/form-data` POST; the browser sets the boundary header
    pub async fn post_form<T: DeserializeOwned>(&self, route: &ApiRoute, form: web_sys::FormData) -> ApiResult<T> {
        let request = Request::post(&self.url(route)).body(form).map_err(|e| ApiError::Encode(e.to_string()))?;
        read_json(send(request, "POST", route).await?).await
    }
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> ApiResult<Request> {
    builder.json(body).map_err(|e| ApiError::Encode(e.to_string()))
}

async fn send(request: Request, method: &str, route: &ApiRoute) -> ApiResult<Response> {
    tracing::debug!(%method, path = %route, "request");
    let response = request.send().await.map_err(|e| {
        tracing::warn!(%method, path = %route, error = %e, "request failed");
        ApiError::Network(e.to_string())
    })?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &response.status_text(), &body);
    tracing::warn!(%method, path = %route, status, %message, "request rejected");
    Err(ApiError::Status { status, message })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    decode_body(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keys() {
        assert_eq!(error_message(409, "Conflict", r#"{"message":"Serial already exists"}"#), "Serial already exists");
        assert_eq!(error_message(400, "Bad Request", r#"{"error":"bad pincode"}"#), "bad pincode");
        assert_eq!(error_message(404, "Not Found", r#"{"detail":"Subproject not found"}"#), "Subproject not found");
    }

    #[test]
    fn test_detail_list() {
        let body = r#"{"detail":[{"loc":["body","name"],"msg":"field required"},{"msg":"value too long"}]}"#;
        assert_eq!(error_message(422, "Unprocessable Entity", body), "field required; value too long");
    }

    #[test]
    fn test_falls_back_to_status_text() {
        assert_eq!(error_message(502, "Bad Gateway", "<html>oops</html>"), "Bad Gateway (502)");
        assert_eq!(error_message(500, "", r#"{"message":"  "}"#), "Request failed with status 500");
    }

    #[test]
    fn test_empty_body_decodes_to_unit() {
        assert_eq!(decode_body::<()>("").unwrap(), ());
        assert_eq!(decode_body::<Option<u32>>("  ").unwrap(), None);
        assert!(matches!(decode_body::<Vec<u32>>("{"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_domain_errors_pass_through() {
        let err: ApiError = DomainError::Conflict("already reverted".to_string()).into();
        assert_eq!(err.to_string(), "Conflict: already reverted");
        assert_eq!(err.status(), None);
    }
}
