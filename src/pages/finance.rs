//! Finance Page
//!
//! Invoices, payments, expenses and credit notes, with the receivables
//! summary recomputed from whatever the filter leaves visible.

use acs_domain::{
    format_currency, format_date, from_wire, paginate, parse_amount, wire_name, FinanceSummary,
    FinancialTransaction, Pagination, RecordId, TransactionDraft, TransactionFilter, TransactionKind,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    badge, date_input_value, optional_text, parse_date_input, today, DeleteConfirmButton, FieldError, FormError,
    FormErrors, Modal, PaginationBar, ProgressBar, TextField,
};
use crate::context::use_app_context;
use crate::store::{project_name, use_app_store, AppStateStoreFields};

#[component]
pub fn FinancePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (transactions, set_transactions) = signal(Vec::<FinancialTransaction>::new());
    let filter = RwSignal::new(TransactionFilter::default());
    let (page, set_page) = signal(1usize);
    let (adding, set_adding) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = ctx.api();
        spawn_local(async move {
            match api::list_transactions(&api).await {
                Ok(list) => set_transactions.set(list),
                Err(e) => ctx.report(&e),
            }
        });
    });

    Effect::new(move |_| {
        filter.track();
        set_page.set(1);
    });

    let visible = Memo::new(move |_| {
        let filter = filter.get();
        let mut matched: Vec<FinancialTransaction> =
            transactions.with(|list| filter.apply(list).into_iter().cloned().collect());
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    });
    let currency = Memo::new(move |_| ctx.config.with(|c| c.currency.clone()));
    let summary = Memo::new(move |_| {
        currency.with(|code| visible.with(|list| FinanceSummary::from_transactions(list.iter(), code)))
    });
    let rows = Memo::new(move |_| visible.with(|list| paginate(list, Pagination::new(page.get(), ctx.page_size()))));

    let delete = move |txn: FinancialTransaction| {
        let api = ctx.api();
        spawn_local(async move {
            match api::delete_transaction(&api, &txn.id).await {
                Ok(()) => {
                    set_transactions.update(|list| list.retain(|t| t.id != txn.id));
                    ctx.success("Transaction deleted");
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    let card = move |label: &'static str, amount: fn(&FinanceSummary) -> f64| {
        view! {
            <div class="card">
                <span class="card-label">{label}</span>
                <span class="card-value">{move || format_currency(summary.with(amount), &currency.get())}</span>
            </div>
        }
    };

    view! {
        <section class="page finance">
            <header class="page-header">
                <h1>"Finance"</h1>
                <button class="btn btn-primary" on:click=move |_| set_adding.set(true)>"Add transaction"</button>
            </header>

            <div class="toolbar">
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.project_id = optional_text(&value).map(RecordId::new));
                }>
                    <option value="">"All projects"</option>
                    {move || store.projects().with(|projects| {
                        projects
                            .iter()
                            .map(|p| view! { <option value=p.id.to_string()>{p.name.clone()}</option> })
                            .collect_view()
                    })}
                </select>
                <select on:change=move |ev| filter.update(|f| f.kind = from_wire(&event_target_value(&ev)))>
                    <option value="">"All kinds"</option>
                    {TransactionKind::ALL
                        .iter()
                        .map(|k| view! { <option value=wire_name(k)>{k.as_label()}</option> })
                        .collect_view()}
                </select>
                <label class="inline-field">
                    "From"
                    <input
                        type="date"
                        prop:value=move || filter.with(|f| date_input_value(f.from))
                        on:change=move |ev| filter.update(|f| f.from = parse_date_input(&event_target_value(&ev)))
                    />
                </label>
                <label class="inline-field">
                    "To"
                    <input
                        type="date"
                        prop:value=move || filter.with(|f| date_input_value(f.to))
                        on:change=move |ev| filter.update(|f| f.to = parse_date_input(&event_target_value(&ev)))
                    />
                </label>
                <Show when=move || filter.with(|f| *f != TransactionFilter::default())>
                    <button class="btn btn-small" on:click=move |_| filter.set(TransactionFilter::default())>
                        "Clear filters"
                    </button>
                </Show>
            </div>

            <div class="cards">
                {card("Net billed", FinanceSummary::net_billed)}
                {card("Received", |s| s.received)}
                {card("Outstanding", FinanceSummary::outstanding)}
                {card("Expenses", |s| s.expenses)}
                {card("Margin", FinanceSummary::margin)}
            </div>

            {move || summary.with(FinanceSummary::excluded_note).map(|note| view! {
                <p class="muted">{note}</p>
            })}

            <ProgressBar
                label="Collected"
                percent=Signal::derive(move || summary.with(FinanceSummary::collection_rate))
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Project"</th>
                        <th>"Kind"</th>
                        <th>"Reference"</th>
                        <th class="numeric">"Amount"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || rows.with(|r| r.items.is_empty())>
                        <tr><td colspan="6" class="empty">"No transactions found"</td></tr>
                    </Show>
                    <For
                        each=move || rows.get().items
                        key=|t| t.id.clone()
                        let:txn
                    >
                        {
                            let delete_target = txn.clone();
                            view! {
                                <tr>
                                    <td>{format_date(txn.date)}</td>
                                    <td>{project_name(&store, &txn.project_id)}</td>
                                    <td>{badge(&txn.kind)}</td>
                                    <td>{txn.reference.clone().unwrap_or_default()}</td>
                                    <td class="numeric">{format_currency(txn.amount, &txn.currency)}</td>
                                    <td class="row-actions">
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
                <TransactionForm
                    project_id=filter.with_untracked(|f| f.project_id.clone())
                    on_close=move |_| set_adding.set(false)
                    on_saved=move |saved: FinancialTransaction| set_transactions.update(|list| list.push(saved))
                />
            </Show>
        </section>
    }
}

#[component]
fn TransactionForm(
    project_id: Option<RecordId>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<FinancialTransaction>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let mut initial = TransactionDraft::new(today(), &ctx.currency());
    if let Some(id) = project_id {
        initial.project_id = id;
    }
    let draft = RwSignal::new(initial);
    // Typed text; parsed on submit
    let amount = RwSignal::new(String::new());
    let errors = FormErrors::new();
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut body = draft.get_untracked();
        body.amount = amount.with_untracked(|a| parse_amount(a)).unwrap_or(0.0);
        body.currency = body.currency.trim().to_uppercase();
        if !errors.check(body.validate()) {
            return;
        }
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let result = api::create_transaction(&api, &body).await;
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    ctx.success(format!("Recorded {}", saved.kind.as_label().to_lowercase()));
                    on_saved.run(saved);
                    on_close.run(());
                }
                Err(e) => ctx.mutation_failed(&e),
            }
        });
    };

    view! {
        <Modal title="Add transaction".to_string() on_close=on_close>
            <form class="form" on:submit=on_submit>
                <FormError errors=errors />
                <label class="form-field">
                    <span class="form-label">"Project"</span>
                    <select
                        prop:value=move || draft.with(|d| d.project_id.to_string())
                        on:change=move |ev| draft.update(|d| d.project_id = RecordId::new(event_target_value(&ev)))
                    >
                        <option value="">"Select a project"</option>
                        {move || store.projects().with(|projects| {
                            projects
                                .iter()
                                .map(|p| view! { <option value=p.id.to_string()>{p.name.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <FieldError errors=errors field="project_id" />
                </label>
                <div class="form-row">
                    <label class="form-field">
                        <span class="form-label">"Kind"</span>
                        <select
                            prop:value=move || draft.with(|d| wire_name(&d.kind))
                            on:change=move |ev| {
                                if let Some(k) = from_wire(&event_target_value(&ev)) {
                                    draft.update(|d| d.kind = k);
                                }
                            }
                        >
                            {TransactionKind::ALL
                                .iter()
                                .map(|k| view! { <option value=wire_name(k)>{k.as_label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <TextField
                        label="Date"
                        field="date"
                        errors=errors
                        input_type="date"
                        value=Signal::derive(move || draft.with(|d| date_input_value(Some(d.date))))
                        on_input=move |v: String| {
                            if let Some(date) = parse_date_input(&v) {
                                draft.update(|d| d.date = date);
                            }
                        }
                    />
                </div>
                <div class="form-row">
                    <TextField
                        label="Amount"
                        field="amount"
                        errors=errors
                        placeholder="0.00"
                        value=Signal::derive(move || amount.get())
                        on_input=move |v: String| amount.set(v)
                    />
                    <TextField
                        label="Currency"
                        field="currency"
                        errors=errors
                        value=Signal::derive(move || draft.with(|d| d.currency.clone()))
                        on_input=move |v: String| draft.update(|d| d.currency = v)
                    />
                </div>
                <TextField
                    label="Reference"
                    field="reference"
                    errors=errors
                    placeholder="Invoice or receipt number"
                    value=Signal::derive(move || draft.with(|d| d.reference.clone().unwrap_or_default()))
                    on_input=move |v: String| draft.update(|d| d.reference = optional_text(&v))
                />
                <TextField
                    label="Notes"
                    field="notes"
                    errors=errors
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
