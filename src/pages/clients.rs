//! Clients Page
//!
//! Searchable, sortable client list with add/edit dialogs.

use acs_domain::{cmp_ignore_case, filter_records, paginate, Client, ClientDraft, Pagination, SortDirection};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::components::{DeleteConfirmButton, FormError, FormErrors, Modal, PaginationBar, SearchBox, TextField};
use crate::context::use_app_context;
use crate::store::{store_remove_client, store_upsert_client, use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortColumn {
    Name,
    Contact,
    Created,
}

#[component]
pub fn ClientsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (sort, set_sort) = signal((SortColumn::Name, SortDirection::Asc));
    // None: closed, Some(None): new client, Some(Some(c)): editing c
    let (dialog, set_dialog) = signal(None::<Option<Client>>);

    // New search text starts from the first page
    Effect::new(move |_| {
        let _ = query.get();
        set_page.set(1);
    });

    let rows = Memo::new(move |_| {
        let (column, direction) = sort.get();
        let mut matched: Vec<Client> = store
            .clients()
            .with(|clients| filter_records(clients, &query.get()).into_iter().cloned().collect());
        matched.sort_by(|a, b| {
            let ord = match column {
                SortColumn::Name => cmp_ignore_case(&a.name, &b.name),
                SortColumn::Contact => cmp_ignore_case(&a.contact_person, &b.contact_person),
                SortColumn::Created => a.created_at.cmp(&b.created_at),
            };
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    let header = move |column: SortColumn, label: &'static str| {
        view! {
            <th class="sortable" on:click=move |_| {
                set_sort.update(|(c, d)| {
                    if *c == column {
                        *d = d.toggle();
                    } else {
                        *c = column;
                        *d = SortDirection::Asc;
                    }
                })
            }>
                {label}
                {move || {
                    let (c, d) = sort.get();
                    (c == column).then(|| format!(" {}", d.arrow()))
                }}
            </th>
        }
    };

    let delete = move |client: Client| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_client(&api, &client.id).await {
                Ok(()) => {
                    store_remove_client(&store, &client.id);
                    ctx.success(format!("Deleted {}", client.name));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page clients">
            <header class="page-header">
                <h1>"Clients"</h1>
                <button class="btn btn-primary" on:click=move |_| set_dialog.set(Some(None))>"Add client"</button>
            </header>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search name, contact, email, GST" />
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        {header(SortColumn::Name, "Name")}
                        {header(SortColumn::Contact, "Contact")}
                        <th>"Email"</th>
                        <th>"Phone"</th>
                        <th>"GST"</th>
                        {header(SortColumn::Created, "Added")}
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr>
                            <td colspan="7" class="empty">
                                {move || if store.loaded().get() { "No clients found" } else { "Loading…" }}
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|client| (client.id.clone(), client.name.clone(), client.email.clone())
                        let:client
                    >
                        {
                            let edit_target = client.clone();
                            let delete_target = client.clone();
                            view! {
                                <tr>
                                    <td>
                                        <A href=format!("/clients/{}", client.id)>{client.name.clone()}</A>
                                    </td>
                                    <td>{client.contact_person.clone()}</td>
                                    <td>{client.email.clone()}</td>
                                    <td>{client.phone.clone()}</td>
                                    <td>{client.gst_number.clone().unwrap_or_default()}</td>
                                    <td class="muted">{client.created_at.clone().map(|t| acs_domain::format_timestamp(&t))}</td>
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

            {move || dialog.get().map(|client| view! {
                <ClientForm client=client on_close=move |_| set_dialog.set(None) />
            })}
        </section>
    }
}

/// Add/edit dialog. Writes the saved record back into the shared store.
#[component]
pub fn ClientForm(client: Option<Client>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editing = client.as_ref().map(|c| c.id.clone());
    let title = if editing.is_some() { "Edit client" } else { "New client" };
    let draft = RwSignal::new(client.as_ref().map(ClientDraft::from_client).unwrap_or_default());
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
                Some(id) => api::update_client(&api, id, &body).await,
                None => api::create_client(&api, &body).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Saved {}", saved.name));
                    store_upsert_client(&store, saved);
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
                <TextField
                    label="Name"
                    field="name"
                    errors=errors
                    value=Signal::derive(move || draft.with(|d| d.name.clone()))
                    on_input=move |v: String| draft.update(|d| d.name = v)
                />
                <TextField
                    label="Contact person"
                    field="contact_person"
                    errors=errors
                    value=Signal::derive(move || draft.with(|d| d.contact_person.clone()))
                    on_input=move |v: String| draft.update(|d| d.contact_person = v)
                />
                <TextField
                    label="Email"
                    field="email"
                    errors=errors
                    input_type="email"
                    value=Signal::derive(move || draft.with(|d| d.email.clone()))
                    on_input=move |v: String| draft.update(|d| d.email = v)
                />
                <TextField
                    label="Phone"
                    field="phone"
                    errors=errors
                    input_type="tel"
                    value=Signal::derive(move || draft.with(|d| d.phone.clone()))
                    on_input=move |v: String| draft.update(|d| d.phone = v)
                />
                <TextField
                    label="Address"
                    field="address"
                    errors=errors
                    value=Signal::derive(move || draft.with(|d| d.address.clone()))
                    on_input=move |v: String| draft.update(|d| d.address = v)
                />
                <TextField
                    label="GST number"
                    field="gst_number"
                    errors=errors
                    placeholder="27AAPFU0939F1ZV"
                    value=Signal::derive(move || draft.with(|d| d.gst_number.clone().unwrap_or_default()))
                    on_input=move |v: String| draft.update(|d| d.gst_number = Some(v))
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
