//! Toast Host

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-host" aria-live="polite">
            <For
                each=move || ctx.toasts.get().toasts().to_vec()
                key=|toast| toast.id
                let:toast
            >
                <div class=toast.kind.css_class()>
                    <span class="toast-message">{toast.message.clone()}</span>
                    <button class="toast-close" on:click=move |_| ctx.dismiss(toast.id)>"×"</button>
                </div>
            </For>
        </div>
    }
}
