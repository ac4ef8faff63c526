//! Project Detail Page
//!
//! Project header, timeline and its subprojects. A subproject's pricing
//! configuration is entered once, at creation; the edit dialog only renames
//! it or changes its status.

use acs_domain::{
    format_currency, format_optional_date, from_wire, project_timeline, wire_name, BillingCycle, ConfigurationInput,
    DomainError, Project, ProjectStatus, RecordId, Subproject, SubprojectDraft, SubprojectUpdate,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::api;
use crate::components::{badge, today, DeleteConfirmButton, FormError, FormErrors, Modal, TextField};
use crate::context::use_app_context;
use crate::store::{client_name, use_app_store};

use super::projects::ProjectForm;

#[derive(Debug, Clone, PartialEq)]
enum SubprojectDialog {
    Create,
    Edit(Subproject),
}

#[component]
pub fn ProjectDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let params = use_params_map();
    let project_id = Memo::new(move |_| params.with(|p| p.get("id")).map(RecordId::new));

    let (project, set_project) = signal(None::<Project>);
    let (subprojects, set_subprojects) = signal(Vec::<Subproject>::new());
    let (not_found, set_not_found) = signal(false);
    let (editing_project, set_editing_project) = signal(false);
    let (dialog, set_dialog) = signal(None::<SubprojectDialog>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(id) = project_id.get() else {
            set_not_found.set(true);
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            match api::get_project(&api, &id).await {
                Ok(p) => {
                    set_not_found.set(false);
                    set_project.set(Some(p));
                }
                Err(e) if e.status() == Some(404) => set_not_found.set(true),
                Err(e) => ctx.report(&e),
            }
            match api::list_subprojects(&api, &id).await {
                Ok(list) => set_subprojects.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    let delete = move |subproject: Subproject| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_subproject(&api, &subproject.project_id, &subproject.id).await {
                Ok(()) => {
                    set_subprojects.update(|list| list.retain(|s| s.id != subproject.id));
                    ctx.success(format!("Deleted {}", subproject.name));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page project-detail">
            <A href="/projects" attr:class="back-link">"← Projects"</A>
            <Show
                when=move || !not_found.get()
                fallback=|| view! { <p class="empty">"This project does not exist."</p> }
            >
                {move || project.get().map(|p| {
                    let edit_target = p.clone();
                    let client_id = p.client_id.clone();
                    view! {
                        <header class="page-header">
                            <div>
                                <h1>{p.name.clone()}</h1>
                                <A href=format!("/clients/{}", p.client_id)>{move || client_name(&store, &client_id)}</A>
                            </div>
                            <div class="header-badges">
                                {badge(&p.status)}
                                {badge(&project_timeline(&p, today()))}
                                <button class="btn" on:click=move |_| set_editing_project.set(true)>"Edit"</button>
                            </div>
                        </header>
                        <dl class="detail-grid">
                            <dt>"Start"</dt><dd>{format_optional_date(p.start_date)}</dd>
                            <dt>"End"</dt><dd>{format_optional_date(p.end_date)}</dd>
                            <dt>"Description"</dt><dd>{p.description.clone().unwrap_or_default()}</dd>
                        </dl>
                        <Show when=move || editing_project.get()>
                            <ProjectForm
                                project=Some(edit_target.clone())
                                on_close=move |_| {
                                    set_editing_project.set(false);
                                    ctx.reload();
                                }
                            />
                        </Show>
                    }
                })}

                <header class="section-header">
                    <h2>"Subprojects"</h2>
                    <button class="btn btn-primary" on:click=move |_| set_dialog.set(Some(SubprojectDialog::Create))>
                        "Add subproject"
                    </button>
                </header>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Subproject"</th>
                            <th>"Status"</th>
                            <th>"Units"</th>
                            <th>"Rental / unit"</th>
                            <th>"Tenure"</th>
                            <th>"Contract value"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || subprojects.with(Vec::is_empty)>
                            <tr><td colspan="7" class="empty">"No subprojects yet"</td></tr>
                        </Show>
                        <For
                            each=move || subprojects.get()
                            key=|s| (s.id.clone(), s.name.clone(), s.status)
                            let:subproject
                        >
                            {
                                let config = subproject.configuration.clone();
                                let currency = ctx.currency();
                                let edit_target = subproject.clone();
                                let delete_target = subproject.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <A href=format!(
                                                "/projects/{}/subprojects/{}",
                                                subproject.project_id,
                                                subproject.id,
                                            )>{subproject.name.clone()}</A>
                                        </td>
                                        <td>{badge(&subproject.status)}</td>
                                        <td>{config.planned_units}</td>
                                        <td>{format_currency(config.monthly_rental_per_unit, &currency)}</td>
                                        <td>{format!("{} months", config.tenure_months)}</td>
                                        <td>{format_currency(config.contract_value(), &currency)}</td>
                                        <td class="row-actions">
                                            <button
                                                class="btn btn-small"
                                                on:click=move |_| set_dialog.set(Some(SubprojectDialog::Edit(edit_target.clone())))
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
            </Show>

            {move || {
                let project_id = project_id.get()?;
                let on_close = move |_| set_dialog.set(None);
                let form = match dialog.get()? {
                    SubprojectDialog::Create => view! {
                        <CreateSubprojectForm
                            project_id=project_id
                            on_close=on_close
                            on_created=move |s: Subproject| set_subprojects.update(|list| list.push(s))
                        />
                    }
                    .into_any(),
                    SubprojectDialog::Edit(subproject) => view! {
                        <EditSubprojectForm
                            subproject=subproject
                            on_close=on_close
                            on_saved=move |s: Subproject| set_subprojects.update(|list| {
                                if let Some(slot) = list.iter_mut().find(|x| x.id == s.id) {
                                    *slot = s;
                                }
                            })
                        />
                    }
                    .into_any(),
                };
                Some(form)
            }}
        </section>
    }
}

#[component]
fn CreateSubprojectForm(
    project_id: RecordId,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_created: Callback<Subproject>,
) -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(String::new());
    let status = RwSignal::new(ProjectStatus::Planned);
    let input = RwSignal::new(ConfigurationInput::default());
    let errors = FormErrors::new();
    let (saving, set_saving) = signal(false);
    let currency = ctx.currency();

    // Live pricing preview, shown once every field parses
    let preview = Memo::new(move |_| input.with(|i| i.parse().ok()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let configuration = match input.with_untracked(ConfigurationInput::parse) {
            Ok(c) => c,
            Err(mut parse_errors) => {
                if name.with_untracked(|n| n.trim().is_empty()) {
                    parse_errors.add("name", "Required");
                }
                errors.check(Err(DomainError::Validation(parse_errors)));
                return;
            }
        };
        let draft = SubprojectDraft {
            name: name.get_untracked().trim().to_string(),
            status: status.get_untracked(),
            configuration,
        };
        if !errors.check(draft.validate()) {
            return;
        }
        let api = ctx.api();
        let project_id = project_id.clone();
        set_saving.set(true);
        spawn_local(async move {
            let result = api::create_subproject(&api, &project_id, &draft).await;
            set_saving.set(false);
            match result {
                Ok(created) => {
                    ctx.success(format!("Created {}", created.name));
                    on_created.run(created);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    let number_field = move |label: &'static str,
                             field: &'static str,
                             get: fn(&ConfigurationInput) -> String,
                             set: fn(&mut ConfigurationInput, String)| {
        view! {
            <TextField
                label=label
                field=field
                errors=errors
                value=Signal::derive(move || input.with(get))
                on_input=move |v: String| input.update(|i| set(i, v))
            />
        }
    };

    view! {
        <Modal title="New subproject".to_string() on_close=on_close wide=true>
            <form class="form" on:submit=on_submit>
                <FormError errors=errors />
                <TextField
                    label="Name"
                    field="name"
                    errors=errors
                    value=Signal::derive(move || name.get())
                    on_input=move |v: String| name.set(v)
                />
                <StatusSelect status=status />

                <fieldset class="form-section">
                    <legend>"Configuration"</legend>
                    <p class="muted">"Pricing and tenure cannot be changed after the subproject is created."</p>
                    <div class="form-row">
                        {number_field("Planned units", "planned_units", |i| i.planned_units.clone(), |i, v| i.planned_units = v)}
                        {number_field("Tenure (months)", "tenure_months", |i| i.tenure_months.clone(), |i, v| i.tenure_months = v)}
                    </div>
                    <div class="form-row">
                        {number_field(
                            "Monthly rental per unit",
                            "monthly_rental_per_unit",
                            |i| i.monthly_rental_per_unit.clone(),
                            |i, v| i.monthly_rental_per_unit = v,
                        )}
                        {number_field(
                            "Installation charge per unit",
                            "installation_charge_per_unit",
                            |i| i.installation_charge_per_unit.clone(),
                            |i, v| i.installation_charge_per_unit = v,
                        )}
                    </div>
                    <div class="form-row">
                        <label class="form-field">
                            <span class="form-label">"Billing cycle"</span>
                            <select
                                prop:value=move || input.with(|i| wire_name(&i.billing_cycle))
                                on:change=move |ev| {
                                    if let Some(cycle) = from_wire::<BillingCycle>(&event_target_value(&ev)) {
                                        input.update(|i| i.billing_cycle = cycle);
                                    }
                                }
                            >
                                {BillingCycle::ALL
                                    .iter()
                                    .map(|c| view! { <option value=wire_name(c)>{c.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        {number_field("GST %", "gst_percent", |i| i.gst_percent.clone(), |i, v| i.gst_percent = v)}
                    </div>
                </fieldset>

                <div class="pricing-preview">
                    {move || match preview.get() {
                        Some(config) => {
                            let contract = config.contract_value();
                            let per_cycle = config.billing_amount();
                            view! {
                                <dl class="detail-grid">
                                    <dt>"Contract value"</dt>
                                    <dd>{format_currency(contract, &currency)}</dd>
                                    <dt>"With GST"</dt>
                                    <dd>{format_currency(config.with_gst(contract), &currency)}</dd>
                                    <dt>{format!("Per {} bill", config.billing_cycle.label().to_lowercase())}</dt>
                                    <dd>{format_currency(config.with_gst(per_cycle), &currency)}</dd>
                                </dl>
                            }
                            .into_any()
                        }
                        None => view! { <p class="muted">"Fill in the configuration to see the contract value."</p> }.into_any(),
                    }}
                </div>

                <footer class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Creating…" } else { "Create" }}
                    </button>
                </footer>
            </form>
        </Modal>
    }
}

#[component]
fn EditSubprojectForm(
    subproject: Subproject,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<Subproject>,
) -> impl IntoView {
    let ctx = use_app_context();
    let update = SubprojectUpdate::from_subproject(&subproject);
    let name = RwSignal::new(update.name);
    let status = RwSignal::new(update.status);
    let errors = FormErrors::new();
    let (saving, set_saving) = signal(false);
    let project_id = subproject.project_id.clone();
    let subproject_id = subproject.id.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let body = SubprojectUpdate { name: name.get_untracked().trim().to_string(), status: status.get_untracked() };
        if !errors.check(body.validate()) {
            return;
        }
        let api = ctx.api();
        let (project_id, subproject_id) = (project_id.clone(), subproject_id.clone());
        set_saving.set(true);
        spawn_local(async move {
            let result = api::update_subproject(&api, &project_id, &subproject_id, &body).await;
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Saved {}", saved.name));
                    on_saved.run(saved);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <Modal title=format!("Edit {}", subproject.name) on_close=on_close>
            <form class="form" on:submit=on_submit>
                <FormError errors=errors />
                <TextField
                    label="Name"
                    field="name"
                    errors=errors
                    value=Signal::derive(move || name.get())
                    on_input=move |v: String| name.set(v)
                />
                <StatusSelect status=status />
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

#[component]
fn StatusSelect(status: RwSignal<ProjectStatus>) -> impl IntoView {
    view! {
        <label class="form-field">
            <span class="form-label">"Status"</span>
            <select
                prop:value=move || wire_name(&status.get())
                on:change=move |ev| {
                    if let Some(s) = from_wire(&event_target_value(&ev)) {
                        status.set(s);
                    }
                }
            >
                {ProjectStatus::ALL
                    .iter()
                    .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}
