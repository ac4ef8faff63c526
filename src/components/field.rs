//! Form Helpers
//!
//! Inline field errors and `<input type="date">` conversions shared by the
//! dialogs.

use acs_domain::{DomainError, DomainResult, ValidationErrors};
use chrono::NaiveDate;
use leptos::prelude::*;

/// Field errors of an open form, keyed like the draft's fields. Errors that
/// belong to no field are kept under `"form"`.
#[derive(Clone, Copy)]
pub struct FormErrors {
    errors: RwSignal<ValidationErrors>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self { errors: RwSignal::new(ValidationErrors::new()) }
    }

    pub fn clear(&self) {
        self.errors.set(ValidationErrors::new());
    }

    /// Record the outcome of a draft's `validate()`; true when it passed
    pub fn check(&self, result: DomainResult<()>) -> bool {
        match result {
            Ok(()) => {
                self.clear();
                true
            }
            Err(DomainError::Validation(errors)) => {
                self.errors.set(errors);
                false
            }
            Err(other) => {
                let mut errors = ValidationErrors::new();
                errors.add("form", other.to_string());
                self.errors.set(errors);
                false
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<String> {
        self.errors.with(|e| e.get(field).map(str::to_string))
    }
}

impl Default for FormErrors {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn FieldError(errors: FormErrors, field: &'static str) -> impl IntoView {
    move || errors.get(field).map(|message| view! { <span class="field-error">{message}</span> })
}

/// Labelled single-line input with its inline error
#[component]
pub fn TextField(
    label: &'static str,
    field: &'static str,
    errors: FormErrors,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError errors=errors field=field />
        </label>
    }
}

/// Labelled multi-line input
#[component]
pub fn TextArea(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(default = 4)] rows: u32,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <textarea
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </label>
    }
}

/// Errors that belong to no single field
#[component]
pub fn FormError(errors: FormErrors) -> impl IntoView {
    move || errors.get("form").map(|message| view! { <div class="form-error">{message}</div> })
}

/// Trimmed text, `None` when blank
pub fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Value of a date input; empty or malformed input reads as `None`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input_round() {
        let date = parse_date_input("2026-10-17");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(date_input_value(date), "2026-10-17");
        assert_eq!(parse_date_input(""), None);
        assert_eq!(date_input_value(None), "");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" 27AAPFU0939F1ZV "), Some("27AAPFU0939F1ZV".to_string()));
    }
}
