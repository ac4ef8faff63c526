//! ACS Dashboard App
//!
//! Root component: context, shared store, sidebar layout and routes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::api;
use crate::components::{Sidebar, ToastHost};
use crate::config;
use crate::context::AppContext;
use crate::pages::{
    AssetsPage, AuditPage, ClientDetailPage, ClientsPage, DashboardPage, DocumentsPage, FinancePage,
    InstallationsPage, MaintenancePage, NotFound, ProjectDetailPage, ProjectsPage, SettingsPage,
    SubprojectDetailPage, UsersPage,
};
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(config::load());
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Clients and projects back the name lookups and pickers on most pages
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        let api = ctx.api();
        tracing::debug!(trigger, "loading clients and projects");
        spawn_local(async move {
            match api::list_clients(&api).await {
                Ok(clients) => *store.clients().write() = clients,
                Err(e) => ctx.report(&e),
            }
            match api::list_projects(&api, None).await {
                Ok(projects) => *store.projects().write() = projects,
                Err(e) => ctx.report(&e),
            }
            *store.loaded().write() = true;
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="main-content">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=DashboardPage />
                        <Route path=path!("/clients") view=ClientsPage />
                        <Route path=path!("/clients/:id") view=ClientDetailPage />
                        <Route path=path!("/projects") view=ProjectsPage />
                        <Route path=path!("/projects/:id") view=ProjectDetailPage />
                        <Route path=path!("/projects/:pid/subprojects/:sid") view=SubprojectDetailPage />
                        <Route path=path!("/assets") view=AssetsPage />
                        <Route path=path!("/installations") view=InstallationsPage />
                        <Route path=path!("/maintenance") view=MaintenancePage />
                        <Route path=path!("/finance") view=FinancePage />
                        <Route path=path!("/audit") view=AuditPage />
                        <Route path=path!("/admin/users") view=UsersPage />
                        <Route path=path!("/documents") view=DocumentsPage />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </main>
                <ToastHost />
            </div>
        </Router>
    }
}
