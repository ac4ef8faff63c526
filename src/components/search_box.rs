//! Search Box Component

use leptos::prelude::*;

#[component]
pub fn SearchBox(
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    #[prop(into, default = "Search…".to_string())] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button class="search-clear" title="Clear" on:click=move |_| set_value.set(String::new())>
                    "×"
                </button>
            </Show>
        </div>
    }
}
