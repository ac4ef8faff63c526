//! Installations Page
//!
//! Scheduled and finished installations with their timeline badges.

use acs_domain::{
    filter_records, format_date, format_optional_date, from_wire, installation_badge, is_installation_overdue,
    paginate, wire_name, Installation, InstallationDraft, InstallationStatus, Pagination, RecordId,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    badge, date_input_value, optional_text, parse_date_input, today, DeleteConfirmButton, FieldError, FormError,
    FormErrors, Modal, PaginationBar, RecordPicker, SearchBox, TextArea, TextField,
};
use crate::context::use_app_context;
use crate::pages::pickers::asset_options;
use crate::markdown::parse_markdown;

#[component]
pub fn InstallationsPage() -> impl IntoView {
    let ctx = use_app_context();

    let (installations, set_installations) = signal(Vec::<Installation>::new());
    let (status, set_status) = signal(None::<InstallationStatus>);
    let (overdue_only, set_overdue_only) = signal(false);
    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (dialog, set_dialog) = signal(None::<Option<Installation>>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match api::list_installations(&api).await {
                Ok(list) => set_installations.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = (query.get(), status.get(), overdue_only.get());
        set_page.set(1);
    });

    let rows = Memo::new(move |_| {
        let status = status.get();
        let overdue_only = overdue_only.get();
        let day = today();
        let mut matched: Vec<Installation> = installations.with(|list| {
            filter_records(list, &query.get())
                .into_iter()
                .filter(|i| status.map_or(true, |s| i.status == s))
                .filter(|i| !overdue_only || is_installation_overdue(i, day))
                .cloned()
                .collect()
        });
        matched.sort_by_key(|i| i.scheduled_date);
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    let save = move |id: RecordId, draft: InstallationDraft, done: &'static str| {
        let api = ctx.api();
        spawn_local(async move {
            match api::update_installation(&api, &id, &draft).await {
                Ok(saved) => {
                    set_installations.update(|list| {
                        if let Some(slot) = list.iter_mut().find(|i| i.id == saved.id) {
                            *slot = saved;
                        }
                    });
                    ctx.success(done);
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    let delete = move |installation: Installation| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_installation(&api, &installation.id).await {
                Ok(()) => {
                    set_installations.update(|list| list.retain(|i| i.id != installation.id));
                    ctx.success("Installation deleted");
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page installations">
            <header class="page-header">
                <h1>"Installations"</h1>
                <button class="btn btn-primary" on:click=move |_| set_dialog.set(Some(None))>"Schedule"</button>
            </header>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search technician, notes, unit or site" />
                <select on:change=move |ev| set_status.set(from_wire(&event_target_value(&ev)))>
                    <option value="">"All statuses"</option>
                    {InstallationStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                        .collect_view()}
                </select>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || overdue_only.get()
                        on:change=move |ev| set_overdue_only.set(event_target_checked(&ev))
                    />
                    "Overdue only"
                </label>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Unit"</th>
                        <th>"Site"</th>
                        <th>"Scheduled"</th>
                        <th>"Completed"</th>
                        <th>"Technician"</th>
                        <th>"Status"</th>
                        <th>"Timeline"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="8" class="empty">"No installations found"</td></tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|i| (i.id.clone(), i.status, i.scheduled_date, i.completed_date)
                        let:installation
                    >
                        {
                            let finished = installation.status.is_finished();
                            let complete_target = installation.clone();
                            let edit_target = installation.clone();
                            let delete_target = installation.clone();
                            let notes = installation.notes.as_deref().map(parse_markdown);
                            view! {
                                <tr>
                                    <td>{format!("#{}", installation.asset_id)}</td>
                                    <td>{format!("#{}", installation.site_id)}</td>
                                    <td>{format_date(installation.scheduled_date)}</td>
                                    <td>{format_optional_date(installation.completed_date)}</td>
                                    <td>{installation.technician.clone().unwrap_or_default()}</td>
                                    <td>{badge(&installation.status)}</td>
                                    <td>{badge(&installation_badge(&installation, today()))}</td>
                                    <td class="row-actions">
                                        <Show when=move || !finished>
                                            <button
                                                class="btn btn-small btn-primary"
                                                on:click={
                                                    let target = complete_target.clone();
                                                    move |_| save(
                                                        target.id.clone(),
                                                        InstallationDraft::completed_on(&target, today()),
                                                        "Installation marked complete",
                                                    )
                                                }
                                            >
                                                "Mark complete"
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
                                {notes.map(|html| view! {
                                    <tr class="notes-row">
                                        <td colspan="8" class="markdown" inner_html=html></td>
                                    </tr>
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

            {move || dialog.get().map(|installation| view! {
                <InstallationForm
                    installation=installation
                    on_close=move |_| set_dialog.set(None)
                    on_saved=move |saved: Installation| set_installations.update(|list| {
                        match list.iter_mut().find(|i| i.id == saved.id) {
                            Some(slot) => *slot = saved,
                            None => list.push(saved),
                        }
                    })
                />
            })}
        </section>
    }
}

#[component]
fn InstallationForm(
    installation: Option<Installation>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<Installation>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing = installation.as_ref().map(|i| i.id.clone());
    let title = if editing.is_some() { "Edit installation" } else { "Schedule installation" };
    let draft = RwSignal::new(
        installation
            .as_ref()
            .map(InstallationDraft::from_installation)
            .unwrap_or_else(|| InstallationDraft::new(today())),
    );
    let errors = FormErrors::new();
    let units = asset_options();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let body = draft.get_untracked();
        if !errors.check(body.validate()) {
            return;
        }
        let api = ctx.api();
        let editing = editing.clone();
        set_saving.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api::update_installation(&api, id, &body).await,
                None => api::create_installation(&api, &body).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success("Installation saved");
                    on_saved.run(saved);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <Modal title=title.to_string() on_close=on_close>
            <form class="form" on:submit=on_submit>
                <FormError errors=errors />
                <div class="form-row">
                    <RecordPicker
                        label="Unit"
                        field="asset_id"
                        errors=errors
                        options=units
                        value=Signal::derive(move || draft.with(|d| d.asset_id.clone()))
                        on_select=move |id: RecordId| draft.update(|d| d.asset_id = id)
                    />
                    <TextField
                        label="Site id"
                        field="site_id"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.site_id.to_string()))
                        on_input=move |v: String| draft.update(|d| d.site_id = RecordId::new(v.trim()))
                    />
                </div>
                <div class="form-row">
                    <TextField
                        label="Scheduled date"
                        field="scheduled_date"
                        errors=errors
                        input_type="date"
                        value=Signal::derive(move || draft.with(|d| date_input_value(Some(d.scheduled_date))))
                        on_input=move |v: String| {
                            if let Some(date) = parse_date_input(&v) {
                                draft.update(|d| d.scheduled_date = date);
                            }
                        }
                    />
                    <TextField
                        label="Technician"
                        field="technician"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.technician.clone().unwrap_or_default()))
                        on_input=move |v: String| draft.update(|d| d.technician = optional_text(&v))
                    />
                </div>
                <div class="form-row">
                    <label class="form-field">
                        <span class="form-label">"Status"</span>
                        <select
                            prop:value=move || draft.with(|d| wire_name(&d.status))
                            on:change=move |ev| {
                                if let Some(s) = from_wire(&event_target_value(&ev)) {
                                    draft.update(|d| d.status = s);
                                }
                            }
                        >
                            {InstallationStatus::ALL
                                .iter()
                                .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Completed on"</span>
                        <input
                            type="date"
                            prop:value=move || draft.with(|d| date_input_value(d.completed_date))
                            on:input=move |ev| draft.update(|d| d.completed_date = parse_date_input(&event_target_value(&ev)))
                        />
                        <FieldError errors=errors field="completed_date" />
                    </label>
                </div>
                <TextArea
                    label="Notes (markdown)"
                    value=Signal::derive(move || draft.with(|d| d.notes.clone().unwrap_or_default()))
                    on_input=move |v: String| draft.update(|d| d.notes = optional_text(&v))
                />
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
