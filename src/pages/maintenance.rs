//! Maintenance Page
//!
//! Service tickets against installed units, ordered by priority and watched
//! against their SLA.

use acs_domain::{
    filter_records, format_date, from_wire, paginate, ticket_sla, wire_name, MaintenanceTicket, Pagination,
    RecordId, TicketDraft, TicketPriority, TicketStatus,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    badge, optional_text, today, DeleteConfirmButton, FormError, FormErrors, Modal, PaginationBar, RecordPicker,
    SearchBox, TextArea, TextField,
};
use crate::context::use_app_context;
use crate::pages::pickers::asset_options;
use crate::markdown::parse_markdown;

#[component]
pub fn MaintenancePage() -> impl IntoView {
    let ctx = use_app_context();

    let (tickets, set_tickets) = signal(Vec::<MaintenanceTicket>::new());
    let (priority, set_priority) = signal(None::<TicketPriority>);
    let (open_only, set_open_only) = signal(true);
    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (dialog, set_dialog) = signal(None::<Option<MaintenanceTicket>>);
    let (expanded, set_expanded) = signal(None::<RecordId>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match api::list_tickets(&api).await {
                Ok(list) => set_tickets.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = (query.get(), priority.get(), open_only.get());
        set_page.set(1);
    });

    let rows = Memo::new(move |_| {
        let priority = priority.get();
        let open_only = open_only.get();
        let mut matched: Vec<MaintenanceTicket> = tickets.with(|list| {
            filter_records(list, &query.get())
                .into_iter()
                .filter(|t| priority.map_or(true, |p| t.priority == p))
                .filter(|t| !open_only || t.status.is_open())
                .cloned()
                .collect()
        });
        // Most urgent first, oldest first within a priority
        matched.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.opened_on.cmp(&b.opened_on)));
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    let upsert = move |saved: MaintenanceTicket| {
        set_tickets.update(|list| match list.iter_mut().find(|t| t.id == saved.id) {
            Some(slot) => *slot = saved,
            None => list.push(saved),
        })
    };

    let resolve = move |ticket: MaintenanceTicket| {
        let api = ctx.api();
        let draft = TicketDraft::resolved(&ticket, today());
        spawn_local(async move {
            match api::update_ticket(&api, &ticket.id, &draft).await {
                Ok(saved) => {
                    ctx.success(format!("Resolved \"{}\"", saved.title));
                    upsert(saved);
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    let delete = move |ticket: MaintenanceTicket| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_ticket(&api, &ticket.id).await {
                Ok(()) => {
                    set_tickets.update(|list| list.retain(|t| t.id != ticket.id));
                    ctx.success("Ticket deleted");
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page maintenance">
            <header class="page-header">
                <h1>"Maintenance"</h1>
                <button class="btn btn-primary" on:click=move |_| set_dialog.set(Some(None))>"New ticket"</button>
            </header>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search title, description or unit" />
                <select on:change=move |ev| set_priority.set(from_wire(&event_target_value(&ev)))>
                    <option value="">"All priorities"</option>
                    {TicketPriority::ALL
                        .iter()
                        .map(|p| view! { <option value=wire_name(p)>{p.as_label()}</option> })
                        .collect_view()}
                </select>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || open_only.get()
                        on:change=move |ev| set_open_only.set(event_target_checked(&ev))
                    />
                    "Open only"
                </label>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Unit"</th>
                        <th>"Priority"</th>
                        <th>"Status"</th>
                        <th>"Opened"</th>
                        <th>"SLA"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="7" class="empty">"No tickets found"</td></tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|t| (t.id.clone(), t.status, t.priority, t.title.clone(), t.description.clone())
                        let:ticket
                    >
                        {
                            let id = ticket.id.clone();
                            let toggle_id = ticket.id.clone();
                            let open = ticket.status.is_open();
                            let resolve_target = ticket.clone();
                            let edit_target = ticket.clone();
                            let delete_target = ticket.clone();
                            let description = ticket.description.as_deref().map(parse_markdown);
                            let has_description = description.is_some();
                            view! {
                                <tr>
                                    <td>
                                        <button
                                            class="link-button"
                                            disabled=!has_description
                                            on:click=move |_| set_expanded.update(|e| {
                                                *e = if e.as_ref() == Some(&toggle_id) { None } else { Some(toggle_id.clone()) };
                                            })
                                        >
                                            {ticket.title.clone()}
                                        </button>
                                    </td>
                                    <td>{format!("#{}", ticket.asset_id)}</td>
                                    <td>{badge(&ticket.priority)}</td>
                                    <td>{badge(&ticket.status)}</td>
                                    <td>{format_date(ticket.opened_on)}</td>
                                    <td>{badge(&ticket_sla(&ticket, today()))}</td>
                                    <td class="row-actions">
                                        <Show when=move || open>
                                            <button
                                                class="btn btn-small btn-primary"
                                                on:click={
                                                    let target = resolve_target.clone();
                                                    move |_| resolve(target.clone())
                                                }
                                            >
                                                "Resolve"
                                            </button>
                                        </Show>
                                        <button
                                            class="btn btn-small"
                                            on:click=move |_| set_dialog.set(Some(Some(edit_target.clone())))
                                        >
                                            "Edit"
                                        </button>
                                        <DeleteConfirmButton on_confirm=move |_| delete(delete_target.clone()) />
                                    </td>
                                </tr>
                                {description.map(|html| view! {
                                    <Show when=move || expanded.with(|e| e.as_ref() == Some(&id))>
                                        <tr class="notes-row">
                                            <td colspan="7" class="markdown" inner_html=html.clone()></td>
                                        </tr>
                                    </Show>
                                })}
                            }
                        }
                    </For>
                </tbody>
            </table>

            <PaginationBar
                page=page
                set_page=set_page
                total_pages=Signal::derive(move || rows.with(|r| r.total_pages))
                total=Signal::derive(move || rows.with(|r| r.total))
            />

            {move || dialog.get().map(|ticket| view! {
                <TicketForm ticket=ticket on_close=move |_| set_dialog.set(None) on_saved=upsert />
            })}
        </section>
    }
}

#[component]
fn TicketForm(
    ticket: Option<MaintenanceTicket>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<MaintenanceTicket>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing = ticket.as_ref().map(|t| t.id.clone());
    let title = if editing.is_some() { "Edit ticket" } else { "New ticket" };
    let draft = RwSignal::new(ticket.as_ref().map(TicketDraft::from_ticket).unwrap_or_default());
    let errors = FormErrors::new();
    let units = asset_options();
    let (saving, set_saving) = signal(false);
    let (preview, set_preview) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut body = draft.get_untracked();
        // Resolution date follows the status
        match (body.status.is_open(), body.resolved_on) {
            (true, _) => body.resolved_on = None,
            (false, None) => body.resolved_on = Some(today()),
            (false, Some(_)) => {}
        }
        if !errors.check(body.validate()) {
            return;
        }
        let api = ctx.api();
        let editing = editing.clone();
        set_saving.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api::update_ticket(&api, id, &body).await,
                None => api::create_ticket(&api, &body).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Saved \"{}\"", saved.title));
                    on_saved.run(saved);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <Modal title=title.to_string() on_close=on_close wide=true>
            <form class="form" on:submit=on_submit>
                <FormError errors=errors />
                <div class="form-row">
                    <TextField
                        label="Title"
                        field="title"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.title.clone()))
                        on_input=move |v: String| draft.update(|d| d.title = v)
                    />
                    <RecordPicker
                        label="Unit"
                        field="asset_id"
                        errors=errors
                        options=units
                        value=Signal::derive(move || draft.with(|d| d.asset_id.clone()))
                        on_select=move |id: RecordId| draft.update(|d| d.asset_id = id)
                    />
                </div>
                <div class="form-row">
                    <label class="form-field">
                        <span class="form-label">"Priority"</span>
                        <select
                            prop:value=move || draft.with(|d| wire_name(&d.priority))
                            on:change=move |ev| {
                                if let Some(p) = from_wire(&event_target_value(&ev)) {
                                    draft.update(|d| d.priority = p);
                                }
                            }
                        >
                            {TicketPriority::ALL
                                .iter()
                                .map(|p| {
                                    let label = format!("{} ({} day SLA)", p.as_label(), p.sla_days());
                                    view! { <option value=wire_name(p)>{label}</option> }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Status"</span>
                        <select
                            prop:value=move || draft.with(|d| wire_name(&d.status))
                            on:change=move |ev| {
                                if let Some(s) = from_wire::<TicketStatus>(&event_target_value(&ev)) {
                                    draft.update(|d| d.status = s);
                                }
                            }
                        >
                            {TicketStatus::ALL
                                .iter()
                                .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <div class="tab-row">
                    <button
                        type="button"
                        class=move || if preview.get() { "tab" } else { "tab active" }
                        on:click=move |_| set_preview.set(false)
                    >
                        "Write"
                    </button>
                    <button
                        type="button"
                        class=move || if preview.get() { "tab active" } else { "tab" }
                        on:click=move |_| set_preview.set(true)
                    >
                        "Preview"
                    </button>
                </div>
                <Show
                    when=move || preview.get()
                    fallback=move || view! {
                        <TextArea
                            label="Description (markdown)"
                            rows=8
                            value=Signal::derive(move || draft.with(|d| d.description.clone().unwrap_or_default()))
                            on_input=move |v: String| draft.update(|d| d.description = optional_text(&v))
                        />
                    }
                >
                    <div
                        class="markdown preview"
                        inner_html=move || draft.with(|d| parse_markdown(d.description.as_deref().unwrap_or("")))
                    ></div>
                </Show>
                <footer class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving…" } else { "Save" }}
                    </button>
                </footer>
            </form>
        </Modal>
    }
}
