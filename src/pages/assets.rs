//! Assets Page
//!
//! Every tracked cooling unit, with per-status counts as filter chips.

use acs_domain::{
    count_by_status, filter_records, format_optional_date, from_wire, paginate, parse_amount, wire_name, AcsAsset,
    AssetDraft, AssetStatus, Pagination, RecordId,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    badge, optional_text, DeleteConfirmButton, FormError, FormErrors, Modal, PaginationBar, SearchBox, TextField,
};
use crate::context::use_app_context;

#[component]
pub fn AssetsPage() -> impl IntoView {
    let ctx = use_app_context();

    let (assets, set_assets) = signal(Vec::<AcsAsset>::new());
    let (status, set_status) = signal(None::<AssetStatus>);
    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (dialog, set_dialog) = signal(None::<Option<AcsAsset>>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match api::list_assets(&api, None).await {
                Ok(list) => set_assets.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = (query.get(), status.get());
        set_page.set(1);
    });

    let counts = Memo::new(move |_| assets.with(|a| count_by_status(a)));
    let rows = Memo::new(move |_| {
        let status = status.get();
        let matched: Vec<AcsAsset> = assets.with(|a| {
            filter_records(a, &query.get())
                .into_iter()
                .filter(|x| status.map_or(true, |s| x.status == s))
                .cloned()
                .collect()
        });
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    let delete = move |asset: AcsAsset| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_asset(&api, &asset.id).await {
                Ok(()) => {
                    set_assets.update(|list| list.retain(|a| a.id != asset.id));
                    ctx.success(format!("Deleted unit {}", asset.serial_number));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page assets">
            <header class="page-header">
                <h1>"Assets"</h1>
                <button class="btn btn-primary" on:click=move |_| set_dialog.set(Some(None))>"Add unit"</button>
            </header>

            <div class="chip-row">
                <button
                    class=move || if status.get().is_none() { "chip active" } else { "chip" }
                    on:click=move |_| set_status.set(None)
                >
                    {move || format!("All ({})", assets.with(Vec::len))}
                </button>
                {move || counts.get().into_iter().map(|(s, n)| view! {
                    <button
                        class=move || if status.get() == Some(s) { "chip active" } else { "chip" }
                        on:click=move |_| set_status.set(Some(s))
                    >
                        {format!("{} ({})", s.as_label(), n)}
                    </button>
                }).collect_view()}
            </div>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search serial number or model" />
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Serial"</th>
                        <th>"Model"</th>
                        <th>"Capacity"</th>
                        <th>"Status"</th>
                        <th>"Site"</th>
                        <th>"Installed on"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="7" class="empty">"No units found"</td></tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|a| (a.id.clone(), a.status, a.serial_number.clone(), a.site_id.clone())
                        let:asset
                    >
                        {
                            let edit_target = asset.clone();
                            let delete_target = asset.clone();
                            view! {
                                <tr>
                                    <td class="mono">{asset.serial_number.clone()}</td>
                                    <td>{asset.model.clone()}</td>
                                    <td>{format!("{} TR", asset.capacity_tons)}</td>
                                    <td>{badge(&asset.status)}</td>
                                    <td>{asset.site_id.as_ref().map(|s| format!("#{}", s)).unwrap_or_default()}</td>
                                    <td>{format_optional_date(asset.installed_on)}</td>
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

            {move || dialog.get().map(|asset| view! {
                <AssetForm
                    asset=asset
                    on_close=move |_| set_dialog.set(None)
                    on_saved=move |saved: AcsAsset| set_assets.update(|list| {
                        match list.iter_mut().find(|a| a.id == saved.id) {
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
fn AssetForm(
    asset: Option<AcsAsset>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<AcsAsset>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing = asset.as_ref().map(|a| a.id.clone());
    let title = if editing.is_some() { "Edit unit" } else { "New unit" };
    let draft = RwSignal::new(asset.as_ref().map(AssetDraft::from_asset).unwrap_or_default());
    // Typed text; parsed on submit
    let capacity = RwSignal::new(asset.as_ref().map(|a| a.capacity_tons.to_string()).unwrap_or_default());
    let errors = FormErrors::new();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut body = draft.get_untracked();
        body.capacity_tons = capacity.with_untracked(|c| parse_amount(c)).unwrap_or(0.0);
        if !errors.check(body.validate()) {
            return;
        }
        let api = ctx.api();
        let editing = editing.clone();
        set_saving.set(true);
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api::update_asset(&api, id, &body).await,
                None => api::create_asset(&api, &body).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Saved unit {}", saved.serial_number));
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
                    <TextField
                        label="Serial number"
                        field="serial_number"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.serial_number.clone()))
                        on_input=move |v: String| draft.update(|d| d.serial_number = v)
                    />
                    <TextField
                        label="Model"
                        field="model"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.model.clone()))
                        on_input=move |v: String| draft.update(|d| d.model = v)
                    />
                </div>
                <div class="form-row">
                    <TextField
                        label="Capacity (tons)"
                        field="capacity_tons"
                        errors=errors
                        placeholder="1.5"
                        value=Signal::derive(move || capacity.get())
                        on_input=move |v: String| capacity.set(v)
                    />
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
                            {AssetStatus::ALL
                                .iter()
                                .map(|s| view! { <option value=wire_name(s)>{s.as_label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <div class="form-row">
                    <TextField
                        label="Site id"
                        field="site_id"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.site_id.as_ref().map(|s| s.to_string()).unwrap_or_default()))
                        on_input=move |v: String| draft.update(|d| d.site_id = optional_text(&v).map(RecordId::new))
                    />
                    <TextField
                        label="Subproject id"
                        field="subproject_id"
                        errors=errors
                        value=Signal::derive(move || {
                            draft.with(|d| d.subproject_id.as_ref().map(|s| s.to_string()).unwrap_or_default())
                        })
                        on_input=move |v: String| draft.update(|d| d.subproject_id = optional_text(&v).map(RecordId::new))
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
