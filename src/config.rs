//! Configuration Loading
//!
//! Builds the [`ApiConfig`] at startup from the compiled defaults, the host
//! page's `window.__ACS_CONFIG__` object and the settings saved in local
//! storage, in that order.

use acs_domain::{ApiConfig, PartialConfig};
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// Local-storage key written by the settings page
pub const STORAGE_KEY: &str = "acs.config";

const HOST_CONFIG: &str = "__ACS_CONFIG__";

pub fn load() -> ApiConfig {
    let config = ApiConfig::layered([host_layer(), saved_layer()]);
    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "config loaded");
    config
}

/// Layer injected by the hosting page, if any
fn host_layer() -> PartialConfig {
    let Some(window) = web_sys::window() else {
        return PartialConfig::default();
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(HOST_CONFIG)).unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        return PartialConfig::default();
    }
    match serde_wasm_bindgen::from_value::<PartialConfig>(value) {
        Ok(layer) => layer,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed window.{}", HOST_CONFIG);
            PartialConfig::default()
        }
    }
}

/// Layer saved from the settings page
pub fn saved_layer() -> PartialConfig {
    match LocalStorage::get::<PartialConfig>(STORAGE_KEY) {
        Ok(layer) => layer,
        Err(StorageError::KeyNotFound(_)) => PartialConfig::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring saved settings");
            PartialConfig::default()
        }
    }
}

pub fn save(layer: &PartialConfig) -> Result<(), StorageError> {
    LocalStorage::set(STORAGE_KEY, layer)
}

pub fn clear_saved() {
    LocalStorage::delete(STORAGE_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_reports_storage_errors() {
        // Checked by type only; local storage needs a browser
        let _save: fn(&PartialConfig) -> Result<(), StorageError> = save;
        let err = StorageError::KeyNotFound(STORAGE_KEY.to_string());
        assert!(!err.to_string().is_empty());
    }
}
