//! Dashboard Configuration
//!
//! Compiled defaults, overlaid by the host page's `window.__ACS_CONFIG__`
//! and then by the user's saved settings. Each layer is a [`PartialConfig`];
//! fields it leaves out keep the value from the layer below.

use serde::{Deserialize, Serialize};

use crate::entity::DomainResult;
use crate::validate::{is_valid_currency, ValidationErrors};

pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub toast_timeout_ms: u32,
    pub page_size: usize,
    pub currency: String,
    pub max_upload_mb: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            toast_timeout_ms: 4000,
            page_size: 25,
            currency: "INR".to_string(),
            max_upload_mb: 10,
        }
    }
}

/// One configuration layer; `None` means "not set here"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast_timeout_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_upload_mb: Option<u32>,
}

impl PartialConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check values entered on the settings page
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        if let Some(url) = &self.base_url {
            let url = url.trim();
            if url.is_empty() {
                errors.add("base_url", "Required");
            } else if !(url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://")) {
                errors.add("base_url", "Use an absolute path or an http(s) URL");
            }
        }
        if self.page_size == Some(0) {
            errors.add("page_size", "Must be at least 1");
        }
        if self.max_upload_mb == Some(0) {
            errors.add("max_upload_mb", "Must be at least 1");
        }
        if let Some(currency) = &self.currency {
            if !is_valid_currency(currency) {
                errors.add("currency", "Use a 3-letter currency code");
            }
        }
        errors.into_result()
    }
}

impl ApiConfig {
    /// Apply a layer on top of this config. Blank strings and zero sizes in
    /// the layer are ignored.
    pub fn merge(mut self, layer: PartialConfig) -> Self {
        if let Some(url) = layer.base_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        if let Some(ms) = layer.toast_timeout_ms {
            self.toast_timeout_ms = ms;
        }
        if let Some(size) = layer.page_size.filter(|s| *s > 0) {
            self.page_size = size;
        }
        if let Some(currency) = layer.currency.filter(|c| is_valid_currency(c)) {
            self.currency = currency.to_ascii_uppercase();
        }
        if let Some(mb) = layer.max_upload_mb.filter(|mb| *mb > 0) {
            self.max_upload_mb = mb;
        }
        self
    }

    /// Defaults overlaid by each layer in order; later layers win
    pub fn layered<I: IntoIterator<Item = PartialConfig>>(layers: I) -> Self {
        layers.into_iter().fold(Self::default(), Self::merge)
    }

    /// Join the base URL and a route path with exactly one slash
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", base)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        u64::from(self.max_upload_mb) * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let mut config = ApiConfig::default();
        assert_eq!(config.url("/clients"), "/api/clients");
        config.base_url = "https://acs.example.in/api/".to_string();
        assert_eq!(config.url("clients/3"), "https://acs.example.in/api/clients/3");
        assert_eq!(config.url("//clients"), "https://acs.example.in/api/clients");
    }

    #[test]
    fn test_later_layers_win() {
        let host: PartialConfig =
            serde_json::from_str(r#"{"base_url":"https://h/api","page_size":50,"unknown":true}"#).unwrap();
        let saved = PartialConfig { base_url: Some("http://localhost:8080".to_string()), ..Default::default() };
        let config = ApiConfig::layered([host, saved]);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.toast_timeout_ms, 4000);
        assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_blank_values_ignored() {
        let layer = PartialConfig {
            base_url: Some("  ".to_string()),
            page_size: Some(0),
            currency: Some("rupees".to_string()),
            ..Default::default()
        };
        assert!(layer.validate().is_err());
        assert_eq!(ApiConfig::default().merge(layer), ApiConfig::default());
    }

    #[test]
    fn test_empty_layer_changes_nothing() {
        let layer: PartialConfig = serde_json::from_str("{}").unwrap();
        assert!(layer.is_empty());
        assert_eq!(serde_json::to_string(&layer).unwrap(), "{}");
        assert_eq!(ApiConfig::layered([layer]), ApiConfig::default());
    }
}
