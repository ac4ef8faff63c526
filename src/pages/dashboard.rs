//! Dashboard Page
//!
//! Headline cards, asset and installation progress, and the overdue lists.

use acs_domain::{
    format_currency, format_date, installation_badge, relative_days, ticket_sla, AcsAsset, Badge, DashboardSummary,
    FinancialTransaction, Installation, MaintenanceTicket, OVERDUE_LIST_LIMIT,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::components::{badge, today, ProgressBar};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (assets, set_assets) = signal(Vec::<AcsAsset>::new());
    let (installations, set_installations) = signal(Vec::<Installation>::new());
    let (tickets, set_tickets) = signal(Vec::<MaintenanceTicket>::new());
    let (transactions, set_transactions) = signal(Vec::<FinancialTransaction>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            let (a, i, t, f) = load_collections(&api).await;
            match a {
                Ok(list) => set_assets.set(list),
                Err(e) => ctx.report(&e),
            }
            match i {
                Ok(list) => set_installations.set(list),
                Err(e) => ctx.report(&e),
            }
            match t {
                Ok(list) => set_tickets.set(list),
                Err(e) => ctx.report(&e),
            }
            match f {
                Ok(list) => set_transactions.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    let currency = Memo::new(move |_| ctx.config.with(|c| c.currency.clone()));
    let summary = Memo::new(move |_| {
        let projects = store.projects().get();
        DashboardSummary::derive(
            &projects,
            &assets.get(),
            &installations.get(),
            &tickets.get(),
            &transactions.get(),
            &currency.get(),
            today(),
        )
    });

    view! {
        <section class="page dashboard">
            <h1>"Dashboard"</h1>

            <div class="card-grid">
                <div class="card">
                    <span class="card-label">"Active projects"</span>
                    <span class="card-value">
                        {move || format!("{} / {}", summary.with(|s| s.active_projects), summary.with(|s| s.total_projects))}
                    </span>
                </div>
                <div class="card">
                    <span class="card-label">"Units tracked"</span>
                    <span class="card-value">{move || summary.with(|s| s.total_assets)}</span>
                </div>
                <div class="card">
                    <span class="card-label">"Open tickets"</span>
                    <span class="card-value">{move || summary.with(|s| s.open_tickets)}</span>
                    <span class="card-note">
                        {move || format!("{} past SLA", summary.with(|s| s.sla_breaches.len()))}
                    </span>
                </div>
                <div class="card">
                    <span class="card-label">"Outstanding receivables"</span>
                    <span class="card-value">
                        {move || format_currency(summary.with(|s| s.outstanding()), &currency.get())}
                    </span>
                    {move || summary.with(|s| s.finance.excluded_note()).map(|note| view! {
                        <span class="card-note">{note}</span>
                    })}
                </div>
            </div>

            <div class="panel">
                <h2>"Installations"</h2>
                <ProgressBar
                    percent=Signal::derive(move || summary.with(|s| s.installation_completion))
                    label=String::from("Completed")
                />
                <p class="muted">
                    {move || summary.with(|s| format!(
                        "{} of {} scheduled installations completed",
                        s.installations_completed,
                        s.installations_planned,
                    ))}
                </p>
            </div>

            <div class="panel">
                <h2>"Units by status"</h2>
                <ul class="status-counts">
                    {move || summary.with(|s| {
                        let total = s.total_assets as f64;
                        s.assets_by_status
                            .iter()
                            .map(|(status, count)| {
                                let share = acs_domain::percentage(*count as f64, total);
                                view! {
                                    <li>
                                        {badge(status)}
                                        <span class="count">{*count}</span>
                                        <ProgressBar percent=share />
                                    </li>
                                }
                            })
                            .collect_view()
                    })}
                </ul>
            </div>

            <div class="panel-row">
                <div class="panel">
                    <h2>"Overdue installations"</h2>
                    {move || {
                        let overdue = summary.with(|s| s.overdue_installations.clone());
                        if overdue.is_empty() {
                            return view! { <p class="muted">"Nothing overdue."</p> }.into_any();
                        }
                        let more = overdue.len().saturating_sub(OVERDUE_LIST_LIMIT);
                        let day = today();
                        view! {
                            <ul class="overdue-list">
                                {overdue
                                    .into_iter()
                                    .take(OVERDUE_LIST_LIMIT)
                                    .map(|inst| {
                                        let status = installation_badge(&inst, day);
                                        view! {
                                            <li>
                                                <span>{format!("Unit #{} at site #{}", inst.asset_id, inst.site_id)}</span>
                                                <span class="muted">{format_date(inst.scheduled_date)}</span>
                                                <span class=status.badge_class()>{status.label()}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            <Show when=move || { more > 0 }>
                                <A href="/installations">{format!("and {} more", more)}</A>
                            </Show>
                        }
                        .into_any()
                    }}
                </div>

                <div class="panel">
                    <h2>"SLA breaches"</h2>
                    {move || {
                        let breaches = summary.with(|s| s.sla_breaches.clone());
                        if breaches.is_empty() {
                            return view! { <p class="muted">"All open tickets are within SLA."</p> }.into_any();
                        }
                        let day = today();
                        view! {
                            <ul class="overdue-list">
                                {breaches
                                    .into_iter()
                                    .take(OVERDUE_LIST_LIMIT)
                                    .map(|ticket| {
                                        let sla = ticket_sla(&ticket, day);
                                        view! {
                                            <li>
                                                {badge(&ticket.priority)}
                                                <span>{ticket.title.clone()}</span>
                                                <span class="muted">
                                                    {format!("opened {}", relative_days(ticket.opened_on, day))}
                                                </span>
                                                <span class=sla.badge_class()>{sla.label()}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            <A href="/maintenance">"Open maintenance"</A>
                        }
                        .into_any()
                    }}
                </div>
            </div>
        </section>
    }
}

/// The four dashboard collections, requested one after another
async fn load_collections(
    api: &api::ApiClient,
) -> (
    api::ApiResult<Vec<AcsAsset>>,
    api::ApiResult<Vec<Installation>>,
    api::ApiResult<Vec<MaintenanceTicket>>,
    api::ApiResult<Vec<FinancialTransaction>>,
) {
    let assets = api::list_assets(api, None).await;
    let installations = api::list_installations(api).await;
    let tickets = api::list_tickets(api).await;
    let transactions = api::list_transactions(api).await;
    (assets, installations, tickets, transactions)
}
