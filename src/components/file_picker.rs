//! File Picker Component

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Single-file input; hands the chosen `File` to `on_file` and clears the
/// input so the same file can be picked again
#[component]
pub fn FilePicker(
    #[prop(into)] accept: String,
    #[prop(into)] on_file: Callback<web_sys::File>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into, default = "Choose file".to_string())] label: String,
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file.run(file);
        }
        input.set_value("");
    };

    view! {
        <label class=move || if disabled.get() { "file-picker disabled" } else { "file-picker" }>
            <input type="file" accept=accept disabled=move || disabled.get() on:change=on_change />
            <span class="btn">{label}</span>
        </label>
    }
}
