//! Projects Page
//!
//! Project list with status filter, search and the add/edit dialog.

use acs_domain::{
    filter_records, format_optional_date, from_wire, paginate, project_timeline, wire_name, Pagination, Project,
    ProjectDraft, ProjectStatus, RecordId,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::components::{
    badge, date_input_value, optional_text, parse_date_input, today, DeleteConfirmButton, FieldError, FormError,
    FormErrors, Modal, PaginationBar, SearchBox, TextArea, TextField,
};
use crate::context::use_app_context;
use crate::store::{client_name, store_remove_project, store_upsert_project, use_app_store, AppStateStoreFields};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (status, set_status) = signal(None::<ProjectStatus>);
    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (dialog, set_dialog) = signal(None::<Option<Project>>);

    Effect::new(move |_| {
        let _ = (query.get(), status.get());
        set_page.set(1);
    });

    let rows = Memo::new(move |_| {
        let status = status.get();
        let matched: Vec<Project> = store.projects().with(|projects| {
            filter_records(projects, &query.get())
                .into_iter()
                .filter(|p| status.map_or(true, |s| p.status == s))
                .cloned()
                .collect()
        });
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    let delete = move |project: Project| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_project(&api, &project.id).await {
                Ok(()) => {
                    store_remove_project(&store, &project.id);
                    ctx.success(format!("Deleted {}", project.name));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page projects">
            <header class="page-header">
                <h1>"Projects"</h1>
                <button class="btn btn-primary" on:click=move |_| set_dialog.set(Some(None))>"Add project"</button>
            </header>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search projects" />
                <select on:change=move |ev| set_status.set(from_wire(&event_target_value(&ev)))>
                    <option value="">"All statuses"</option>
                    {ProjectStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Project"</th>
                        <th>"Client"</th>
                        <th>"Status"</th>
                        <th>"End"</th>
                        <th>"Timeline"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="6" class="empty">"No projects found"</td></tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|p| (p.id.clone(), p.name.clone(), p.status, p.end_date)
                        let:project
                    >
                        {
                            let edit_target = project.clone();
                            let delete_target = project.clone();
                            let client_id = project.client_id.clone();
                            let project_name = project.name.clone();
                            view! {
                                <tr>
                                    <td><A href=format!("/projects/{}", project.id)>{project_name}</A></td>
                                    <td>
                                        <A href=format!("/clients/{}", project.client_id)>
                                            {move || client_name(&store, &client_id)}
                                        </A>
                                    </td>
                                    <td>{badge(&project.status)}</td>
                                    <td>{format_optional_date(project.end_date)}</td>
                                    <td>{badge(&project_timeline(&project, today()))}</td>
                                    <td class="row-actions">
                                        <button
                                            class="btn btn-small"
                                            on:click=move |_| set_dialog.set(Some(Some(edit_target.clone())))
                                        >
                                            "Edit"
                                        </button>
                                        <DeleteConfirmButton on_confirm=move |_| delete(delete_target.clone()) />
                                    </td>
                                </tr>
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

            {move || dialog.get().map(|project| view! {
                <ProjectForm project=project on_close=move |_| set_dialog.set(None) />
            })}
        </section>
    }
}

/// Add/edit dialog; a new project may be pre-assigned to a client
#[component]
pub fn ProjectForm(
    project: Option<Project>,
    #[prop(optional)] client_id: Option<RecordId>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editing = project.as_ref().map(|p| p.id.clone());
    let title = if editing.is_some() { "Edit project" } else { "New project" };
    let draft = RwSignal::new(match &project {
        Some(p) => ProjectDraft::from_project(p),
        None => ProjectDraft { client_id: client_id.unwrap_or_default(), ..Default::default() },
    });
    let errors = FormErrors::new();
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
                Some(id) => api::update_project(&api, id, &body).await,
                None => api::create_project(&api, &body).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Saved {}", saved.name));
                    store_upsert_project(&store, saved);
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
                <label class="form-field">
                    <span class="form-label">"Client"</span>
                    <select
                        prop:value=move || draft.with(|d| d.client_id.to_string())
                        on:change=move |ev| draft.update(|d| d.client_id = RecordId::new(event_target_value(&ev)))
                    >
                        <option value="">"Select a client"</option>
                        {move || store.clients().with(|clients| {
                            clients
                                .iter()
                                .map(|c| view! { <option value=c.id.to_string()>{c.name.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <FieldError errors=errors field="client_id" />
                </label>
                <TextField
                    label="Name"
                    field="name"
                    errors=errors
                    value=Signal::derive(move || draft.with(|d| d.name.clone()))
                    on_input=move |v: String| draft.update(|d| d.name = v)
                />
                <TextArea
                    label="Description"
                    value=Signal::derive(move || draft.with(|d| d.description.clone().unwrap_or_default()))
                    on_input=move |v: String| draft.update(|d| d.description = optional_text(&v))
                />
                <label class="form-field">
                    <span class="form-label">"Status"</span>
                    <select
                        prop:value=move || draft.with(|d| wire_name(&d.status))
                        on:change=move |ev| {
                            if let Some(status) = from_wire(&event_target_value(&ev)) {
                                draft.update(|d| d.status = status);
                            }
                        }
                    >
                        {ProjectStatus::ALL
                            .iter()
                            .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <div class="form-row">
                    <TextField
                        label="Start date"
                        field="start_date"
                        errors=errors
                        input_type="date"
                        value=Signal::derive(move || draft.with(|d| date_input_value(d.start_date)))
                        on_input=move |v: String| draft.update(|d| d.start_date = parse_date_input(&v))
                    />
                    <TextField
                        label="End date"
                        field="end_date"
                        errors=errors
                        input_type="date"
                        value=Signal::derive(move || draft.with(|d| date_input_value(d.end_date)))
                        on_input=move |v: String| draft.update(|d| d.end_date = parse_date_input(&v))
                    />
                </div>
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
