//! Documents Page
//!
//! Files attached to projects, sites, assets and clients.

use acs_domain::{
    filter_records, format_file_size, format_timestamp, paginate, Document, DocumentTarget, Pagination, RecordId,
    DOCUMENT_ENTITY_TYPES,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{FilePicker, PaginationBar, SearchBox};
use crate::context::use_app_context;
use crate::toast::ToastKind;

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let ctx = use_app_context();

    let (documents, set_documents) = signal(Vec::<Document>::new());
    let target = RwSignal::new(DocumentTarget::default());
    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (uploading, set_uploading) = signal(false);

    // Refetch only when the target is complete or cleared
    let applied = Memo::new(move |_| target.with(|t| t.is_set().then(|| t.clone())));

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let applied = applied.get();
        let api = ctx.api();
        spawn_local(async move {
            match api::list_documents(&api, applied.as_ref()).await {
                Ok(list) => set_documents.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = (query.get(), applied.get());
        set_page.set(1);
    });

    let rows = Memo::new(move |_| {
        let matched: Vec<Document> =
            documents.with(|docs| filter_records(docs, &query.get()).into_iter().cloned().collect());
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    let on_file = move |file: web_sys::File| {
        let api = ctx.api();
        let limit = api.config().max_upload_bytes();
        if file.size() > limit as f64 {
            ctx.notify(
                ToastKind::Error,
                format!("{} is larger than the {} upload limit", file.name(), format_file_size(limit)),
            );
            return;
        }
        let target = target.get_untracked();
        if !target.entity_type.is_empty() && !target.is_set() {
            ctx.notify(ToastKind::Info, "Enter an entity id, or clear the entity type, before uploading");
            return;
        }
        set_uploading.set(true);
        spawn_local(async move {
            let result = api::upload_document(&api, &file, &target).await;
            set_uploading.set(false);
            match result {
                Ok(doc) => {
                    ctx.success(format!("Uploaded {}", doc.file_name));
                    set_documents.update(|docs| docs.insert(0, doc));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page documents">
            <header class="page-header">
                <h1>"Documents"</h1>
                <FilePicker
                    accept=""
                    label="Upload file"
                    disabled=uploading
                    on_file=on_file
                />
            </header>
            <Show when=move || uploading.get()>
                <p class="muted">"Uploading…"</p>
            </Show>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search file name" />
                <select
                    prop:value=move || target.with(|t| t.entity_type.clone())
                    on:change=move |ev| target.update(|t| t.entity_type = event_target_value(&ev))
                >
                    <option value="">"Any entity"</option>
                    {DOCUMENT_ENTITY_TYPES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Entity id"
                    prop:value=move || target.with(|t| t.entity_id.to_string())
                    on:change=move |ev| target.update(|t| t.entity_id = RecordId::new(event_target_value(&ev).trim()))
                />
                <Show when=move || target.with(|t| *t != DocumentTarget::default())>
                    <button class="btn btn-small" on:click=move |_| target.set(DocumentTarget::default())>
                        "Clear"
                    </button>
                </Show>
            </div>
            <p class="muted">
                {move || match applied.get() {
                    Some(t) => format!("Showing and uploading documents for {} #{}", t.entity_type, t.entity_id),
                    None => "Showing all documents; uploads are not attached to a record".to_string(),
                }}
            </p>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"File"</th>
                        <th>"Attached to"</th>
                        <th class="numeric">"Size"</th>
                        <th>"Uploaded"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="4" class="empty">"No documents found"</td></tr>
                    </Show>
                    <For each=move || rows.get().items key=|d| d.id.clone() let:doc>
                        {
                            let attached = match (&doc.entity_type, &doc.entity_id) {
                                (Some(kind), Some(id)) => format!("{} #{}", kind, id),
                                (Some(kind), None) => kind.clone(),
                                _ => String::new(),
                            };
                            let icon = doc.extension().unwrap_or_else(|| "file".to_string());
                            view! {
                                <tr>
                                    <td>
                                        <span class="file-ext">{icon}</span>
                                        <a href=doc.url.clone() target="_blank" rel="noopener">{doc.file_name.clone()}</a>
                                    </td>
                                    <td>{attached}</td>
                                    <td class="numeric">{format_file_size(doc.size_bytes)}</td>
                                    <td>{doc.uploaded_at.as_deref().map(format_timestamp).unwrap_or_default()}</td>
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
        </section>
    }
}
