//! Settings Page
//!
//! Browser-local overrides of the API configuration. Saved values form the
//! last configuration layer, so they win over the host page's settings.

use acs_domain::{DomainError, DomainResult, PartialConfig, ValidationErrors};
use leptos::prelude::*;

use crate::components::{FormError, FormErrors, TextField};
use crate::config;
use crate::context::use_app_context;
use crate::toast::ToastKind;

/// Settings as typed; blank fields are left to the lower layers
#[derive(Debug, Clone, Default, PartialEq)]
struct SettingsInput {
    base_url: String,
    page_size: String,
    toast_timeout_ms: String,
    currency: String,
    max_upload_mb: String,
}

impl SettingsInput {
    fn from_layer(layer: &PartialConfig) -> Self {
        fn text<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        Self {
            base_url: text(&layer.base_url),
            page_size: text(&layer.page_size),
            toast_timeout_ms: text(&layer.toast_timeout_ms),
            currency: text(&layer.currency),
            max_upload_mb: text(&layer.max_upload_mb),
        }
    }

    fn to_layer(&self) -> DomainResult<PartialConfig> {
        let mut errors = ValidationErrors::new();
        let mut number = |field: &'static str, value: &str| -> Option<u64> {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            match value.parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    errors.add(field, "Enter a whole number");
                    None
                }
            }
        };
        // Out-of-range numbers saturate
        let page_size = number("page_size", &self.page_size).map(|n| usize::try_from(n).unwrap_or(usize::MAX));
        let toast_timeout_ms =
            number("toast_timeout_ms", &self.toast_timeout_ms).map(|n| u32::try_from(n).unwrap_or(u32::MAX));
        let max_upload_mb = number("max_upload_mb", &self.max_upload_mb).map(|n| u32::try_from(n).unwrap_or(u32::MAX));
        let text = |value: &str| Some(value.trim()).filter(|v| !v.is_empty()).map(str::to_string);

        let layer = PartialConfig {
            base_url: text(&self.base_url),
            page_size,
            toast_timeout_ms,
            currency: text(&self.currency).map(|c| c.to_uppercase()),
            max_upload_mb,
        };
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        layer.validate()?;
        Ok(layer)
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let input = RwSignal::new(SettingsInput::from_layer(&config::saved_layer()));
    let errors = FormErrors::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let layer = match input.with_untracked(SettingsInput::to_layer) {
            Ok(layer) => layer,
            Err(e) => {
                errors.check(Err(e));
                return;
            }
        };
        errors.clear();
        if let Err(e) = config::save(&layer) {
            tracing::warn!(error = %e, "could not save settings");
            ctx.notify(ToastKind::Error, format!("Could not save settings: {}", e));
            return;
        }
        ctx.set_config(config::load());
        ctx.success("Settings saved");
    };

    let reset = move |_| {
        config::clear_saved();
        input.set(SettingsInput::default());
        errors.clear();
        ctx.set_config(config::load());
        ctx.success("Settings reset");
    };

    // Effective values, shown next to each field
    let effective = move |f: fn(&acs_domain::ApiConfig) -> String| move || ctx.config.with(f);

    let field = move |label: &'static str,
                      name: &'static str,
                      get: fn(&SettingsInput) -> String,
                      set: fn(&mut SettingsInput, String),
                      current: fn(&acs_domain::ApiConfig) -> String| {
        view! {
            <div class="settings-field">
                <TextField
                    label=label
                    field=name
                    errors=errors
                    value=Signal::derive(move || input.with(get))
                    on_input=move |v: String| input.update(|i| set(i, v))
                />
                <span class="muted">"In use: " {effective(current)}</span>
            </div>
        }
    };

    view! {
        <section class="page settings">
            <header class="page-header">
                <h1>"Settings"</h1>
            </header>
            <p class="muted">"Stored in this browser only. Leave a field blank to use the deployment default."</p>

            <form class="form settings-form" on:submit=on_submit>
                <FormError errors=errors />
                {field(
                    "API base URL",
                    "base_url",
                    |i| i.base_url.clone(),
                    |i, v| i.base_url = v,
                    |c| c.base_url.clone(),
                )}
                {field(
                    "Rows per page",
                    "page_size",
                    |i| i.page_size.clone(),
                    |i, v| i.page_size = v,
                    |c| c.page_size.to_string(),
                )}
                {field(
                    "Toast duration (ms)",
                    "toast_timeout_ms",
                    |i| i.toast_timeout_ms.clone(),
                    |i, v| i.toast_timeout_ms = v,
                    |c| c.toast_timeout_ms.to_string(),
                )}
                {field(
                    "Currency",
                    "currency",
                    |i| i.currency.clone(),
                    |i, v| i.currency = v,
                    |c| c.currency.clone(),
                )}
                {field(
                    "Upload limit (MB)",
                    "max_upload_mb",
                    |i| i.max_upload_mb.clone(),
                    |i, v| i.max_upload_mb = v,
                    |c| c.max_upload_mb.to_string(),
                )}
                <footer class="form-actions">
                    <button type="button" class="btn" on:click=reset>"Reset to defaults"</button>
                    <button type="submit" class="btn btn-primary">"Save"</button>
                </footer>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_stay_unset() {
        let layer = SettingsInput::default().to_layer().unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_fields_are_parsed() {
        let input = SettingsInput {
            base_url: " https://acs.example.in/api ".to_string(),
            page_size: "50".to_string(),
            currency: "usd".to_string(),
            ..SettingsInput::default()
        };
        let layer = input.to_layer().unwrap();
        assert_eq!(layer.base_url.as_deref(), Some("https://acs.example.in/api"));
        assert_eq!(layer.page_size, Some(50));
        assert_eq!(layer.currency.as_deref(), Some("USD"));
        assert_eq!(layer.toast_timeout_ms, None);
        assert_eq!(SettingsInput::from_layer(&layer).page_size, "50");
    }

    #[test]
    fn test_large_numbers_saturate() {
        let input = SettingsInput {
            page_size: "18446744073709551615".to_string(),
            toast_timeout_ms: "5000000000".to_string(),
            max_upload_mb: "4294967296".to_string(),
            ..SettingsInput::default()
        };
        let layer = input.to_layer().unwrap();
        assert_eq!(layer.page_size, Some(usize::MAX));
        assert_eq!(layer.toast_timeout_ms, Some(u32::MAX));
        assert_eq!(layer.max_upload_mb, Some(u32::MAX));
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let input = SettingsInput {
            page_size: "many".to_string(),
            max_upload_mb: "0".to_string(),
            base_url: "ftp://files".to_string(),
            ..SettingsInput::default()
        };
        let Err(DomainError::Validation(errors)) = input.to_layer() else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("page_size"), Some("Enter a whole number"));
        assert!(errors.get("max_upload_mb").is_none());

        let input = SettingsInput { max_upload_mb: "0".to_string(), ..SettingsInput::default() };
        let Err(DomainError::Validation(errors)) = input.to_layer() else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("max_upload_mb"), Some("Must be at least 1"));
    }
}
