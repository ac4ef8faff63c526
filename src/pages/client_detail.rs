//! Client Detail Page

use acs_domain::{format_date, format_optional_date, project_timeline, Client, Project, RecordId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::api;
use crate::components::{badge, today};
use crate::context::use_app_context;

use super::clients::ClientForm;
use super::projects::ProjectForm;

#[component]
pub fn ClientDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();
    let client_id = Memo::new(move |_| params.with(|p| p.get("id")).map(RecordId::new));

    let (client, set_client) = signal(None::<Client>);
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (not_found, set_not_found) = signal(false);
    let (editing, set_editing) = signal(false);
    let (adding_project, set_adding_project) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(id) = client_id.get() else {
            set_not_found.set(true);
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            match api::get_client(&api, &id).await {
                Ok(c) => {
                    set_not_found.set(false);
                    set_client.set(Some(c));
                }
                Err(e) if e.status() == Some(404) => set_not_found.set(true),
                Err(e) => ctx.report(&e),
            }
            match api::list_client_projects(&api, &id).await {
                Ok(list) => set_projects.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    view! {
        <section class="page client-detail">
            <A href="/clients" attr:class="back-link">"← Clients"</A>
            <Show
                when=move || !not_found.get()
                fallback=|| view! { <p class="empty">"This client does not exist."</p> }
            >
                {move || client.get().map(|c| {
                    let edit_target = c.clone();
                    view! {
                        <header class="page-header">
                            <h1>{c.name.clone()}</h1>
                            <button class="btn" on:click=move |_| set_editing.set(true)>"Edit"</button>
                        </header>
                        <dl class="detail-grid">
                            <dt>"Contact"</dt><dd>{c.contact_person.clone()}</dd>
                            <dt>"Email"</dt><dd>{c.email.clone()}</dd>
                            <dt>"Phone"</dt><dd>{c.phone.clone()}</dd>
                            <dt>"Address"</dt><dd>{c.address.clone()}</dd>
                            <dt>"GST"</dt><dd>{c.gst_number.clone().unwrap_or_else(|| "-".to_string())}</dd>
                        </dl>
                        <Show when=move || editing.get()>
                            <ClientForm
                                client=Some(edit_target.clone())
                                on_close=move |_| {
                                    set_editing.set(false);
                                    ctx.reload();
                                }
                            />
                        </Show>
                    }
                })}

                <header class="section-header">
                    <h2>"Projects"</h2>
                    <button class="btn btn-small" on:click=move |_| set_adding_project.set(true)>"New project"</button>
                </header>
                <Show when=move || adding_project.get()>
                    <ProjectForm
                        project=None
                        client_id=client_id.get_untracked().unwrap_or_default()
                        on_close=move |_| {
                            set_adding_project.set(false);
                            ctx.reload();
                        }
                    />
                </Show>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Project"</th>
                            <th>"Status"</th>
                            <th>"Start"</th>
                            <th>"End"</th>
                            <th>"Timeline"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || projects.with(Vec::is_empty)>
                            <tr><td colspan="5" class="empty">"No projects for this client yet"</td></tr>
                        </Show>
                        <For
                            each=move || projects.get()
                            key=|p| (p.id.clone(), p.status, p.end_date)
                            let:project
                        >
                            {
                                let project_name = project.name.clone();
                                view! {
                                    <tr>
                                        <td><A href=format!("/projects/{}", project.id)>{project_name}</A></td>
                                        <td>{badge(&project.status)}</td>
                                        <td>{project.start_date.map(format_date).unwrap_or_default()}</td>
                                        <td>{format_optional_date(project.end_date)}</td>
                                        <td>{badge(&project_timeline(&project, today()))}</td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
            </Show>
        </section>
    }
}
