//! Audit Page
//!
//! Server-paginated log of system actions. Revertable entries can be rolled
//! back, optionally together with every action that depends on them.

use acs_domain::{
    cascade_closure, format_timestamp, mark_reverted, page_count, revert_check, AuditEntry, AuditFilter, Pagination,
    RecordId, RevertRequest, RevertState,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    badge, date_input_value, optional_text, parse_date_input, Modal, PaginationBar, TextArea,
};
use crate::context::use_app_context;

#[component]
pub fn AuditPage() -> impl IntoView {
    let ctx = use_app_context();

    let (entries, set_entries) = signal(Vec::<AuditEntry>::new());
    let (total, set_total) = signal(0usize);
    let (loading, set_loading) = signal(false);
    let filter = RwSignal::new(AuditFilter::default());
    let (page, set_page) = signal(1usize);
    let (reverting, set_reverting) = signal(None::<AuditEntry>);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let filter = filter.get();
        let pagination = Pagination::new(page.get(), ctx.page_size());
        let api = ctx.api();
        set_loading.set(true);
        spawn_local(async move {
            match api::list_audit_logs(&api, &filter, pagination).await {
                Ok((list, count)) => {
                    set_entries.set(list);
                    set_total.set(count);
                }
                Err(e) => ctx.report(&e),
            }
            set_loading.set(false);
        });
    });

    // Filter edits go back to the first page
    let set_filter = move |f: fn(&mut AuditFilter, String), value: String| {
        filter.update(|filter| f(filter, value));
        set_page.set(1);
    };

    let total_pages = Signal::derive(move || page_count(total.get(), ctx.page_size()));

    view! {
        <section class="page audit">
            <header class="page-header">
                <h1>"Audit log"</h1>
                <Show when=move || loading.get()>
                    <span class="muted">"Loading…"</span>
                </Show>
            </header>

            <div class="toolbar">
                <input
                    type="search"
                    placeholder="Action"
                    on:change=move |ev| set_filter(|f, v| f.action = optional_text(&v), event_target_value(&ev))
                />
                <input
                    type="search"
                    placeholder="Entity type"
                    on:change=move |ev| set_filter(|f, v| f.entity_type = optional_text(&v), event_target_value(&ev))
                />
                <input
                    type="search"
                    placeholder="Actor"
                    on:change=move |ev| set_filter(|f, v| f.actor = optional_text(&v), event_target_value(&ev))
                />
                <label class="inline-field">
                    "From"
                    <input
                        type="date"
                        prop:value=move || filter.with(|f| date_input_value(f.from))
                        on:change=move |ev| set_filter(|f, v| f.from = parse_date_input(&v), event_target_value(&ev))
                    />
                </label>
                <label class="inline-field">
                    "To"
                    <input
                        type="date"
                        prop:value=move || filter.with(|f| date_input_value(f.to))
                        on:change=move |ev| set_filter(|f, v| f.to = parse_date_input(&v), event_target_value(&ev))
                    />
                </label>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"When"</th>
                        <th>"Actor"</th>
                        <th>"Action"</th>
                        <th>"Entity"</th>
                        <th>"Summary"</th>
                        <th>"State"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || entries.with(Vec::is_empty) && !loading.get()>
                        <tr><td colspan="7" class="empty">"No audit entries found"</td></tr>
                    </Show>
                    <For
                        each=move || entries.get()
                        key=|e| (e.id.clone(), e.reverted)
                        let:entry
                    >
                        {
                            let state = entry.revert_state();
                            let target = entry.clone();
                            let entity = match &entry.entity_id {
                                Some(id) => format!("{} #{}", entry.entity_type, id),
                                None => entry.entity_type.clone(),
                            };
                            let dependents = entry.dependent_ids.len();
                            view! {
                                <tr class:reverted=entry.reverted>
                                    <td class="nowrap">{format_timestamp(&entry.timestamp)}</td>
                                    <td>{entry.actor.clone()}</td>
                                    <td class="mono">{entry.action.clone()}</td>
                                    <td>{entity}</td>
                                    <td>
                                        {entry.summary.clone().unwrap_or_default()}
                                        {(dependents > 0).then(|| view! {
                                            <span class="muted">{format!(" ({} dependent)", dependents)}</span>
                                        })}
                                    </td>
                                    <td>{badge(&state)}</td>
                                    <td class="row-actions">
                                        <Show when=move || state == RevertState::Revertable>
                                            <button
                                                class="btn btn-small btn-danger"
                                                on:click={
                                                    let target = target.clone();
                                                    move |_| set_reverting.set(Some(target.clone()))
                                                }
                                            >
                                                "Revert…"
                                            </button>
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    </For>
                </tbody>
            </table>

            <PaginationBar page=page set_page=set_page total_pages=total_pages total=total />

            {move || reverting.get().map(|entry| view! {
                <RevertDialog
                    entry=entry
                    entries=entries
                    on_close=move |_| set_reverting.set(None)
                    on_reverted={move |ids: Vec<RecordId>| set_entries.update(|list| {
                        mark_reverted(list, &ids);
                    })}
                />
            })}
        </section>
    }
}

/// Confirmation dialog that previews the cascade before reverting
#[component]
fn RevertDialog(
    entry: AuditEntry,
    entries: ReadSignal<Vec<AuditEntry>>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_reverted: Callback<Vec<RecordId>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let entry = StoredValue::new(entry);
    let (cascade, set_cascade) = signal(false);
    let (reason, set_reason) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let dependents = Memo::new(move |_| {
        let id = entry.with_value(|e| e.id.clone());
        entries.with(|list| cascade_closure(&id, list).into_iter().cloned().collect::<Vec<_>>())
    });
    // Why the revert cannot go ahead yet, if anything
    let blocker = Memo::new(move |_| {
        let cascade = cascade.get();
        entries.with(|list| entry.with_value(|e| revert_check(e, list, cascade).err().map(|err| err.to_string())))
    });

    let confirm = move |_| {
        if blocker.get_untracked().is_some() {
            return;
        }
        let target = entry.get_value();
        let request = RevertRequest {
            cascade: cascade.get_untracked(),
            reason: optional_text(&reason.get_untracked()),
        };
        // Used when the server does not list what it reverted
        let mut expected = vec![target.id.clone()];
        if request.cascade {
            expected.extend(dependents.get_untracked().into_iter().map(|d| d.id));
        }
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let result = api::revert_audit_entry(&api, &target.id, &request).await;
            set_saving.set(false);
            match result {
                Ok(result) => {
                    let ids = if result.reverted_ids.is_empty() { expected } else { result.reverted_ids };
                    let message = result.message.unwrap_or_else(|| {
                        format!("Reverted {} action{}", ids.len(), if ids.len() == 1 { "" } else { "s" })
                    });
                    tracing::info!(entry = %target.id, reverted = ids.len(), "audit entry reverted");
                    ctx.success(message);
                    on_reverted.run(ids);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <Modal title="Revert action".to_string() on_close=on_close>
            <div class="form">
                <p>
                    {entry.with_value(|e| format!("{} on {}", e.action, e.entity_type))}
                    <span class="muted">{entry.with_value(|e| format!(" by {}, {}", e.actor, format_timestamp(&e.timestamp)))}</span>
                </p>
                <Show when=move || dependents.with(|d| !d.is_empty())>
                    <div class="cascade-preview">
                        <p>{move || format!("{} dependent action(s) will be affected:", dependents.with(Vec::len))}</p>
                        <ul>
                            <For each=move || dependents.get() key=|d| d.id.clone() let:dependent>
                                <li>
                                    <span class="mono">{dependent.action.clone()}</span>
                                    {format!(" {} · {}", dependent.entity_type, format_timestamp(&dependent.timestamp))}
                                </li>
                            </For>
                        </ul>
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || cascade.get()
                                on:change=move |ev| set_cascade.set(event_target_checked(&ev))
                            />
                            "Also revert dependent actions"
                        </label>
                    </div>
                </Show>
                <TextArea
                    label="Reason (optional)"
                    rows=2
                    value=reason
                    on_input=move |v: String| set_reason.set(v)
                />
                {move || blocker.get().map(|message| view! { <div class="form-error">{message}</div> })}
                <footer class="form-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button
                        type="button"
                        class="btn btn-danger"
                        disabled=move || saving.get() || blocker.with(Option::is_some)
                        on:click=confirm
                    >
                        {move || if saving.get() { "Reverting…" } else { "Revert" }}
                    </button>
                </footer>
            </div>
        </Modal>
    }
}
