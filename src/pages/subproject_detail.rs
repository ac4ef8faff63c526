//! Subproject Detail Page
//!
//! Locked configuration, installation progress, sites and the import
//! history of one subproject.

use acs_domain::{
    format_currency, format_timestamp, project_progress, AcsAsset, RecordId, Site, SiteDraft, Subproject,
    UploadSession,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::api::{self, UploadScope};
use crate::components::{
    badge, optional_text, DeleteConfirmButton, FormError, FormErrors, Modal, ProgressBar, TextField,
};
use crate::context::use_app_context;

use super::import_wizard::ImportWizardDialog;

#[component]
pub fn SubprojectDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();
    let scope = Memo::new(move |_| {
        params.with(|p| match (p.get("pid"), p.get("sid")) {
            (Some(project), Some(subproject)) => Some(UploadScope {
                project: RecordId::new(project),
                subproject: RecordId::new(subproject),
            }),
            _ => None,
        })
    });

    let (subproject, set_subproject) = signal(None::<Subproject>);
    let (sites, set_sites) = signal(Vec::<Site>::new());
    let (assets, set_assets) = signal(Vec::<AcsAsset>::new());
    let (uploads, set_uploads) = signal(Vec::<UploadSession>::new());
    let (not_found, set_not_found) = signal(false);
    let (site_dialog, set_site_dialog) = signal(None::<Option<Site>>);
    let (importing, set_importing) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(scope) = scope.get() else {
            set_not_found.set(true);
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            match api::get_subproject(&api, &scope.project, &scope.subproject).await {
                Ok(s) => {
                    set_not_found.set(false);
                    set_subproject.set(Some(s));
                }
                Err(e) if e.status() == Some(404) => {
                    set_not_found.set(true);
                    return;
                }
                Err(e) => ctx.report(&e),
            }
            match api::list_sites(&api, &scope.project, &scope.subproject).await {
                Ok(list) => set_sites.set(list),
                Err(e) => ctx.report(&e),
            }
            match api::list_subproject_assets(&api, &scope.subproject).await {
                Ok(list) => set_assets.set(list),
                Err(e) => ctx.report(&e),
            }
            match api::list_uploads(&api, &scope).await {
                Ok(list) => set_uploads.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    let installed = Memo::new(move |_| assets.with(|a| a.iter().filter(|x| x.is_installed()).count()));
    let planned = Memo::new(move |_| subproject.with(|s| s.as_ref().map_or(0, |s| s.configuration.planned_units)));

    let delete_site = move |site: Site| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_site(&api, &site.id).await {
                Ok(()) => {
                    set_sites.update(|list| list.retain(|s| s.id != site.id));
                    ctx.success(format!("Deleted {}", site.name));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    let (reverting, set_reverting) = signal(false);
    let revert_upload = move |session: UploadSession| {
        let Some(scope) = scope.get_untracked() else {
            return;
        };
        let api = ctx.api();
        set_reverting.set(true);
        spawn_local(async move {
            let result = api::revert_upload(&api, &scope, &session.id).await;
            set_reverting.set(false);
            match result {
                Ok(outcome) => {
                    ctx.success(format!("Reverted {} rows from {}", outcome.reverted_rows, session.file_name));
                    ctx.reload();
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page subproject-detail">
            {move || scope.get().map(|s| view! {
                <A href=format!("/projects/{}", s.project) attr:class="back-link">"← Project"</A>
            })}
            <Show
                when=move || !not_found.get()
                fallback=|| view! { <p class="empty">"This subproject does not exist."</p> }
            >
                {move || subproject.get().map(|s| {
                    let config = s.configuration.clone();
                    let currency = ctx.currency();
                    view! {
                        <header class="page-header">
                            <h1>{s.name.clone()}</h1>
                            <div class="header-badges">
                                {badge(&s.status)}
                                <button class="btn btn-primary" on:click=move |_| set_importing.set(true)>
                                    "Import units"
                                </button>
                            </div>
                        </header>
                        <div class="panel">
                            <h2>"Configuration"</h2>
                            <dl class="detail-grid">
                                <dt>"Planned units"</dt><dd>{config.planned_units}</dd>
                                <dt>"Monthly rental / unit"</dt>
                                <dd>{format_currency(config.monthly_rental_per_unit, &currency)}</dd>
                                <dt>"Installation charge / unit"</dt>
                                <dd>{format_currency(config.installation_charge_per_unit, &currency)}</dd>
                                <dt>"Tenure"</dt><dd>{format!("{} months", config.tenure_months)}</dd>
                                <dt>"Billing cycle"</dt><dd>{config.billing_cycle.label()}</dd>
                                <dt>"GST"</dt><dd>{format!("{}%", config.gst_percent)}</dd>
                                <dt>"Contract value"</dt>
                                <dd>{format_currency(config.contract_value(), &currency)}</dd>
                                <dt>"With GST"</dt>
                                <dd>{format_currency(config.with_gst(config.contract_value()), &currency)}</dd>
                            </dl>
                        </div>
                    }
                })}

                <div class="panel">
                    <h2>"Installation progress"</h2>
                    <ProgressBar
                        percent=Signal::derive(move || project_progress(planned.get(), installed.get()))
                        label=String::from("Installed")
                    />
                    <p class="muted">{move || format!("{} of {} units installed", installed.get(), planned.get())}</p>
                </div>

                <header class="section-header">
                    <h2>"Sites"</h2>
                    <button class="btn" on:click=move |_| set_site_dialog.set(Some(None))>"Add site"</button>
                </header>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Site"</th>
                            <th>"Address"</th>
                            <th>"Locality"</th>
                            <th>"Pincode"</th>
                            <th>"Contact"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || sites.with(Vec::is_empty)>
                            <tr><td colspan="6" class="empty">"No sites yet"</td></tr>
                        </Show>
                        <For each=move || sites.get() key=|s| (s.id.clone(), s.name.clone(), s.address.clone()) let:site>
                            {
                                let edit_target = site.clone();
                                let delete_target = site.clone();
                                let contact = match (&site.contact_name, &site.contact_phone) {
                                    (Some(n), Some(p)) => format!("{} · {}", n, p),
                                    (Some(n), None) => n.clone(),
                                    (None, Some(p)) => p.clone(),
                                    (None, None) => String::new(),
                                };
                                view! {
                                    <tr>
                                        <td>{site.name.clone()}</td>
                                        <td>{site.address.clone()}</td>
                                        <td>{site.locality()}</td>
                                        <td>{site.pincode.clone()}</td>
                                        <td>{contact}</td>
                                        <td class="row-actions">
                                            <button
                                                class="btn btn-small"
                                                on:click=move |_| set_site_dialog.set(Some(Some(edit_target.clone())))
                                            >
                                                "Edit"
                                            </button>
                                            <DeleteConfirmButton on_confirm=move |_| delete_site(delete_target.clone()) />
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>

                <h2>"Import history"</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"File"</th>
                            <th>"Status"</th>
                            <th>"Rows"</th>
                            <th>"Uploaded"</th>
                            <th>"By"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || uploads.with(Vec::is_empty)>
                            <tr><td colspan="6" class="empty">"Nothing imported yet"</td></tr>
                        </Show>
                        <For each=move || uploads.get() key=|u| (u.id.clone(), u.status) let:session>
                            {
                                let counts = session.counts();
                                let can_revert = session.can_revert();
                                let download = scope
                                    .get_untracked()
                                    .map(|scope| api::download_url(&ctx.api(), &scope, &session.id))
                                    .unwrap_or_default();
                                let revert_target = session.clone();
                                view! {
                                    <tr>
                                        <td>{session.file_name.clone()}</td>
                                        <td>{badge(&session.status)}</td>
                                        <td>
                                            {format!("{} ok · {} warnings · {} errors", counts.success, counts.warning, counts.error)}
                                        </td>
                                        <td>{session.created_at.as_deref().map(format_timestamp).unwrap_or_default()}</td>
                                        <td>{session.uploaded_by.clone().unwrap_or_else(|| "—".to_string())}</td>
                                        <td class="row-actions">
                                            <a class="btn btn-small" href=download target="_blank" rel="noopener">"Download"</a>
                                            <Show when=move || can_revert>
                                                <DeleteConfirmButton
                                                    label="Revert"
                                                    disabled=reverting
                                                    on_confirm={
                                                        let revert_target = revert_target.clone();
                                                        move |_| revert_upload(revert_target.clone())
                                                    }
                                                />
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
            </Show>

            {move || {
                let scope = scope.get()?;
                let site = site_dialog.get()?;
                Some(view! {
                    <SiteForm
                        scope=scope
                        site=site
                        on_close=move |_| set_site_dialog.set(None)
                        on_saved=move |saved: Site| set_sites.update(|list| {
                            match list.iter_mut().find(|s| s.id == saved.id) {
                                Some(slot) => *slot = saved,
                                None => list.push(saved),
                            }
                        })
                    />
                })
            }}

            {move || {
                let scope = scope.get()?;
                importing.get().then(|| view! {
                    <ImportWizardDialog
                        scope=scope
                        on_close=move |_| set_importing.set(false)
                        on_finished=move |_| ctx.reload()
                    />
                })
            }}
        </section>
    }
}

#[component]
fn SiteForm(
    scope: UploadScope,
    site: Option<Site>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<Site>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing = site.as_ref().map(|s| s.id.clone());
    let title = if editing.is_some() { "Edit site" } else { "New site" };
    let draft = RwSignal::new(site.as_ref().map(SiteDraft::from_site).unwrap_or_default());
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
        let scope = scope.clone();
        set_saving.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api::update_site(&api, id, &body).await,
                None => api::create_site(&api, &scope.project, &scope.subproject, &body).await,
            };
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

    let field = move |label: &'static str,
                      name: &'static str,
                      get: fn(&SiteDraft) -> String,
                      set: fn(&mut SiteDraft, String)| {
        view! {
            <TextField
                label=label
                field=name
                errors=errors
                value=Signal::derive(move || draft.with(get))
                on_input=move |v: String| draft.update(|d| set(d, v))
            />
        }
    };

    view! {
        <Modal title=title.to_string() on_close=on_close>
            <form class="form" on:submit=on_submit>
                <FormError errors=errors />
                {field("Name", "name", |d| d.name.clone(), |d, v| d.name = v)}
                {field("Address", "address", |d| d.address.clone(), |d, v| d.address = v)}
                <div class="form-row">
                    {field("City", "city", |d| d.city.clone(), |d, v| d.city = v)}
                    {field("State", "state", |d| d.state.clone(), |d, v| d.state = v)}
                    {field("Pincode", "pincode", |d| d.pincode.clone(), |d, v| d.pincode = v)}
                </div>
                <div class="form-row">
                    {field(
                        "Contact name",
                        "contact_name",
                        |d| d.contact_name.clone().unwrap_or_default(),
                        |d, v| d.contact_name = optional_text(&v),
                    )}
                    {field(
                        "Contact phone",
                        "contact_phone",
                        |d| d.contact_phone.clone().unwrap_or_default(),
                        |d, v| d.contact_phone = optional_text(&v),
                    )}
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
