//! Record Picker Component
//!
//! `<select>` over a fetched collection with a type-ahead filter in front of
//! it, for dialogs that reference another record by id.

use acs_domain::{picker_matches, PickerOption, RecordId};
use leptos::prelude::*;

use super::{FieldError, FormErrors};

/// # Arguments
/// * `options` - Every selectable record, already labelled
/// * `value` - Currently selected id; the empty id means none
/// * `on_select` - Runs with the chosen id
#[component]
pub fn RecordPicker(
    label: &'static str,
    field: &'static str,
    errors: FormErrors,
    #[prop(into)] options: Signal<Vec<PickerOption>>,
    #[prop(into)] value: Signal<RecordId>,
    #[prop(into)] on_select: Callback<RecordId>,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());

    let visible = Memo::new(move |_| {
        let selected = value.get();
        options.with(|all| {
            query.with(|q| picker_matches(all, q, &selected).into_iter().cloned().collect::<Vec<_>>())
        })
    });

    view! {
        <div class="form-field record-picker">
            <span class="form-label">{label}</span>
            <input
                type="search"
                placeholder="Type to filter"
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />
            <select on:change=move |ev| on_select.run(RecordId::new(event_target_value(&ev)))>
                <option value="" selected=move || value.with(|v| v.as_str().is_empty())>
                    {move || if visible.with(Vec::is_empty) { "No matches" } else { "Select…" }}
                </option>
                <For each=move || visible.get() key=|o| o.id.clone() let:option>
                    {
                        let id = option.id.clone();
                        view! {
                            <option value=option.id.to_string() selected=move || value.with(|v| *v == id)>
                                {option.label}
                            </option>
                        }
                    }
                </For>
            </select>
            <FieldError errors=errors field=field />
        </div>
    }
}
