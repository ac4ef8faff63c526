//! Fallback Page

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <section class="page not-found">
            <h1>"Page not found"</h1>
            <p>"The page you asked for does not exist."</p>
            <A href="/">"Back to the dashboard"</A>
        </section>
    }
}
