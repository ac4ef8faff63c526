//! Modal Dialog Component

use leptos::prelude::*;

/// Centered dialog over a dimmed backdrop. The parent decides when it is
/// mounted; `on_close` fires on the × button, a backdrop click or Escape.
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let class = if wide { "modal modal-wide" } else { "modal" };

    view! {
        <div
            class="modal-backdrop"
            on:click=move |_| on_close.run(())
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Escape" {
                    on_close.run(());
                }
            }
            tabindex="-1"
        >
            <div class=class role="dialog" on:click=|ev| ev.stop_propagation()>
                <header class="modal-header">
                    <h2>{move || title.get()}</h2>
                    <button class="modal-close" title="Close" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
