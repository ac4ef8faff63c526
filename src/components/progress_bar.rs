//! Progress Bar Component

use acs_domain::format_percent;
use leptos::prelude::*;

/// Horizontal bar filled to `percent` (0-100)
#[component]
pub fn ProgressBar(
    #[prop(into)] percent: Signal<f64>,
    #[prop(into, optional)] label: Option<String>,
) -> impl IntoView {
    let clamped = move || percent.get().clamp(0.0, 100.0);
    let tone = move || {
        let p = clamped();
        if p >= 100.0 {
            "progress-fill progress-done"
        } else if p >= 50.0 {
            "progress-fill progress-mid"
        } else {
            "progress-fill progress-low"
        }
    };

    view! {
        <div class="progress">
            {label.map(|l| view! { <span class="progress-label">{l}</span> })}
            <div class="progress-track">
                <div class=tone style=move || format!("width: {:.1}%", clamped())></div>
            </div>
            <span class="progress-value">{move || format_percent(clamped())}</span>
        </div>
    }
}
