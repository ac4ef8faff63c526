//! Users Page
//!
//! Account administration: roles, activation and invitations.

use acs_domain::{filter_records, format_timestamp, from_wire, paginate, wire_name, Pagination, Role, User, UserDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, FormError, FormErrors, Modal, PaginationBar, SearchBox, TextField};
use crate::context::use_app_context;
use crate::store::{store_remove_user, store_upsert_user, use_app_store, AppStateStoreFields};

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (adding, set_adding) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match api::list_users(&api).await {
                Ok(users) => *store.users().write() = users,
                Err(e) => ctx.report(&e),
            }
        });
    });

    Effect::new(move |_| {
        query.track();
        set_page.set(1);
    });

    let rows = Memo::new(move |_| {
        let mut matched: Vec<User> =
            store.users().with(|users| filter_records(users, &query.get()).into_iter().cloned().collect());
        matched.sort_by(|a, b| b.active.cmp(&a.active).then_with(|| a.name.cmp(&b.name)));
        paginate(&matched, Pagination::new(page.get(), ctx.page_size()))
    });

    // Role and activation changes are saved right away
    let save = move |user: User, draft: UserDraft| {
        let api = ctx.api();
        spawn_local(async move {
            match api::update_user(&api, &user.id, &draft).await {
                Ok(saved) => {
                    ctx.success(format!("Updated {}", saved.name));
                    store_upsert_user(&store, saved);
                }
                Err(e) => {
                    ctx.mutation_failed(&e);
                    store_upsert_user(&store, user);
                }
            }
        });
    };

    let delete = move |user: User| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_user(&api, &user.id).await {
                Ok(()) => {
                    store_remove_user(&store, &user.id);
                    ctx.success(format!("Removed {}", user.name));
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <section class="page users">
            <header class="page-header">
                <h1>"Users"</h1>
                <button class="btn btn-primary" on:click=move |_| set_adding.set(true)>"Add user"</button>
            </header>

            <div class="toolbar">
                <SearchBox value=query set_value=set_query placeholder="Search name, email or role" />
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th></th>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
                        <th>"Last login"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="7" class="empty">"No users found"</td></tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|u| (u.id.clone(), u.role, u.active, u.name.clone())
                        let:user
                    >
                        {
                            let role_target = user.clone();
                            let toggle_target = user.clone();
                            let delete_target = user.clone();
                            let active = user.active;
                            let id = user.id.clone();
                            // Follows the store so a rejected change snaps back
                            let current_role = move || {
                                store.users().with(|users| {
                                    users.iter().find(|u| u.id == id).map(|u| wire_name(&u.role)).unwrap_or_default()
                                })
                            };
                            view! {
                                <tr class:inactive=!active>
                                    <td><span class="avatar">{user.initial()}</span></td>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <select
                                            prop:value=current_role
                                            on:change=move |ev| {
                                                if let Some(role) = from_wire::<Role>(&event_target_value(&ev)) {
                                                    let mut draft = UserDraft::from_user(&role_target);
                                                    draft.role = role;
                                                    save(role_target.clone(), draft);
                                                }
                                            }
                                        >
                                            {Role::ALL
                                                .iter()
                                                .map(|r| view! { <option value=wire_name(r)>{r.as_label()}</option> })
                                                .collect_view()}
                                        </select>
                                    </td>
                                    <td>
                                        <span class={if active { "badge badge-success" } else { "badge badge-neutral" }}>
                                            {if active { "Active" } else { "Inactive" }}
                                        </span>
                                    </td>
                                    <td>{user.last_login.as_deref().map(format_timestamp).unwrap_or_else(|| "Never".to_string())}</td>
                                    <td class="row-actions">
                                        <button
                                            class="btn btn-small"
                                            on:click=move |_| {
                                                let mut draft = UserDraft::from_user(&toggle_target);
                                                draft.active = !draft.active;
                                                save(toggle_target.clone(), draft);
                                            }
                                        >
                                            {if active { "Deactivate" } else { "Activate" }}
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

            <Show when=move || adding.get()>
                <UserForm on_close=move |_| set_adding.set(false) />
            </Show>
        </section>
    }
}

#[component]
fn UserForm(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let draft = RwSignal::new(UserDraft { active: true, ..UserDraft::default() });
    let errors = FormErrors::new();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let body = draft.get_untracked();
        if !errors.check(body.validate()) {
            return;
        }
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let result = api::create_user(&api, &body).await;
            set_saving.set(false);
            match result {
                Ok(user) => {
                    ctx.success(format!("Added {}", user.name));
                    store_upsert_user(&store, user);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <Modal title="Add user".to_string() on_close=on_close>
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
                    label="Email"
                    field="email"
                    errors=errors
                    input_type="email"
                    value=Signal::derive(move || draft.with(|d| d.email.clone()))
                    on_input=move |v: String| draft.update(|d| d.email = v.trim().to_string())
                />
                <label class="form-field">
                    <span class="form-label">"Role"</span>
                    <select
                        prop:value=move || draft.with(|d| wire_name(&d.role))
                        on:change=move |ev| {
                            if let Some(role) = from_wire(&event_target_value(&ev)) {
                                draft.update(|d| d.role = role);
                            }
                        }
                    >
                        {Role::ALL
                            .iter()
                            .map(|r| view! { <option value=wire_name(r)>{r.as_label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.active)
                        on:change=move |ev| draft.update(|d| d.active = event_target_checked(&ev))
                    />
                    "Active"
                </label>
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
