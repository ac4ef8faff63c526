//! Delete Confirm Button Component
//!
//! Two-step button for destructive row actions.

use leptos::prelude::*;

/// Shows `label`; the first click arms it and swaps in "`label`?" with
/// ✓/✗ buttons, and only ✓ runs `on_confirm`.
///
/// # Arguments
/// * `label` - Action name, "Delete" unless given
/// * `button_class` - CSS class of the unarmed button
/// * `disabled` - Blocks arming, e.g. while a request is running
/// * `on_confirm` - Runs after the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into, default = "Delete".to_string())] label: String,
    #[prop(into, default = "btn btn-small btn-danger".to_string())] button_class: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (armed, set_armed) = signal(false);
    let label = StoredValue::new(label);
    let button_class = StoredValue::new(button_class);

    // Row clicks must not see these
    let disarm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_armed.set(false);
    };
    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_armed.set(false);
        on_confirm.run(());
    };

    move || {
        if armed.get() && !disabled.get() {
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{label.with_value(|l| format!("{}?", l))}</span>
                    <button class="confirm-btn" title="Confirm" on:click=confirm>"✓"</button>
                    <button class="cancel-btn" title="Cancel" on:click=disarm>"✗"</button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    class=button_class.get_value()
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(true);
                    }
                >
                    {label.get_value()}
                </button>
            }
            .into_any()
        }
    }
}
