//! Pagination Bar Component

use leptos::prelude::*;

/// Previous/next controls for a 1-based page
#[component]
pub fn PaginationBar(
    page: ReadSignal<usize>,
    set_page: WriteSignal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
) -> impl IntoView {
    let has_prev = move || page.get() > 1;
    let has_next = move || page.get() < total_pages.get();

    view! {
        <nav class="pagination">
            <button
                class="btn btn-small"
                disabled=move || !has_prev()
                on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
            >
                "‹ Prev"
            </button>
            <span class="pagination-info">
                {move || format!("Page {} of {} · {} records", page.get(), total_pages.get().max(1), total.get())}
            </span>
            <button
                class="btn btn-small"
                disabled=move || !has_next()
                on:click=move |_| set_page.update(|p| *p += 1)
            >
                "Next ›"
            </button>
        </nav>
    }
}
