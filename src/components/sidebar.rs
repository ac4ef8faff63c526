//! Navigation Sidebar

use leptos::prelude::*;
use leptos_router::components::A;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/clients", "Clients"),
    ("/projects", "Projects"),
    ("/assets", "Assets"),
    ("/installations", "Installations"),
    ("/maintenance", "Maintenance"),
    ("/finance", "Finance"),
    ("/documents", "Documents"),
    ("/audit", "Audit log"),
    ("/admin/users", "Users"),
    ("/settings", "Settings"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">"ACS Installations"</div>
            <nav class="sidebar-nav">
                {NAV_ITEMS
                    .iter()
                    .map(|(href, label)| view! { <A href=*href attr:class="nav-link">{*label}</A> })
                    .collect_view()}
            </nav>
        </aside>
    }
}
