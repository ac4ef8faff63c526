//! Import Wizard Dialog
//!
//! Upload a CSV/XLSX file into a subproject, review and correct the rows the
//! server flagged, process the batch and optionally revert it. Every step
//! goes through [`ImportWizard`], which rejects out-of-order actions.

use acs_domain::{accept_attribute, format_file_size, Badge, DomainResult, ImportWizard, RowStatus, WizardStep};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, UploadScope};
use crate::components::{badge, FilePicker, Modal};
use crate::context::use_app_context;
use crate::toast::ToastKind;

const STEP_LABELS: &[&str] = &["Select file", "Review", "Process", "Done"];

/// Run a wizard transition, handing back its verdict
fn transition(
    wizard: RwSignal<ImportWizard>,
    f: impl FnOnce(&mut ImportWizard) -> DomainResult<()>,
) -> DomainResult<()> {
    let mut result = Ok(());
    wizard.update(|w| result = f(w));
    result
}

#[component]
pub fn ImportWizardDialog(
    scope: UploadScope,
    #[prop(into)] on_close: Callback<()>,
    /// Fired after the server changed data (processed or reverted)
    #[prop(into)] on_finished: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let max_bytes = ctx.config.with_untracked(|c| c.max_upload_bytes());
    let wizard = RwSignal::new(ImportWizard::new(max_bytes));
    // web_sys::File is not Send
    let pending = RwSignal::new_local(None::<web_sys::File>);
    let scope = StoredValue::new(scope);

    let step = Memo::new(move |_| wizard.with(|w| w.step()));
    let busy = Signal::derive(move || step.get().is_busy());

    let rejected = move |err: acs_domain::DomainError| ctx.notify(ToastKind::Error, err.to_string());

    let on_file = move |file: web_sys::File| {
        let name = file.name();
        let size = file.size() as u64;
        match transition(wizard, |w| w.choose_file(&name, size)) {
            Ok(()) => pending.set(Some(file)),
            Err(e) => rejected(e),
        }
    };

    let upload = move |_| {
        let Some(file) = pending.get_untracked() else {
            return;
        };
        if let Err(e) = transition(wizard, ImportWizard::begin_upload) {
            rejected(e);
            return;
        }
        let api = ctx.api();
        let scope = scope.get_value();
        spawn_local(async move {
            let result = api::upload_file(&api, &scope, &file).await;
            let outcome = match result {
                Ok(session) => {
                    tracing::info!(upload = %session.id, rows = session.rows.len(), "upload validated");
                    transition(wizard, |w| w.upload_succeeded(session))
                }
                Err(e) => transition(wizard, |w| w.upload_failed(e.to_string())),
            };
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "upload finished after the wizard moved on");
            }
        });
    };

    let submit_corrections = move |_| {
        if let Err(e) = transition(wizard, ImportWizard::begin_corrections) {
            rejected(e);
            return;
        }
        let (upload_id, body) = wizard.with_untracked(|w| {
            (w.session().map(|s| s.id.clone()).unwrap_or_default(), w.corrections())
        });
        let api = ctx.api();
        let scope = scope.get_value();
        spawn_local(async move {
            let outcome = match api::correct_upload(&api, &scope, &upload_id, &body).await {
                Ok(session) => {
                    ctx.success(format!("{} rows re-validated", body.rows.len()));
                    transition(wizard, |w| w.corrections_applied(session))
                }
                Err(e) => {
                    ctx.report(&e);
                    transition(wizard, |w| w.request_failed(e.to_string()))
                }
            };
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "corrections finished after the wizard moved on");
            }
        });
    };

    let process = move |_| {
        if let Err(e) = transition(wizard, ImportWizard::begin_process) {
            rejected(e);
            return;
        }
        let (upload_id, request) = wizard.with_untracked(|w| {
            (w.session().map(|s| s.id.clone()).unwrap_or_default(), w.process_request())
        });
        let api = ctx.api();
        let scope = scope.get_value();
        spawn_local(async move {
            let outcome = match api::process_upload(&api, &scope, &upload_id, request).await {
                Ok(outcome) => {
                    ctx.success(format!("Imported {} rows", outcome.processed_rows));
                    on_finished.run(());
                    transition(wizard, |w| w.processed(outcome))
                }
                Err(e) => transition(wizard, |w| w.request_failed(e.to_string())),
            };
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "processing finished after the wizard moved on");
            }
        });
    };

    let revert = move |_| {
        if let Err(e) = transition(wizard, ImportWizard::begin_revert) {
            rejected(e);
            return;
        }
        let upload_id = wizard.with_untracked(|w| w.session().map(|s| s.id.clone()).unwrap_or_default());
        let api = ctx.api();
        let scope = scope.get_value();
        spawn_local(async move {
            let outcome = match api::revert_upload(&api, &scope, &upload_id).await {
                Ok(outcome) => {
                    ctx.success(format!("Reverted {} rows", outcome.reverted_rows));
                    on_finished.run(());
                    transition(wizard, |w| w.reverted(outcome))
                }
                Err(e) => transition(wizard, |w| w.request_failed(e.to_string())),
            };
            if let Err(e) = outcome {
                tracing::warn!(error = %e, "revert finished after the wizard moved on");
            }
        });
    };

    let start_over = move |_| {
        wizard.update(ImportWizard::reset);
        pending.set(None);
    };

    let close = move |_| {
        if busy.get_untracked() {
            ctx.notify(ToastKind::Info, "Wait for the current request to finish");
        } else {
            on_close.run(());
        }
    };

    view! {
        <Modal title=Signal::derive(move || step.get().title().to_string()) on_close=close wide=true>
            <ol class="wizard-steps">
                {STEP_LABELS
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        let ordinal = i + 1;
                        view! {
                            <li class=move || {
                                let current = step.get().ordinal();
                                if ordinal == current {
                                    "wizard-step current"
                                } else if ordinal < current {
                                    "wizard-step done"
                                } else {
                                    "wizard-step"
                                }
                            }>{*label}</li>
                        }
                    })
                    .collect_view()}
            </ol>

            {move || wizard.with(|w| w.error().map(str::to_string)).map(|message| view! {
                <div class="form-error">{message}</div>
            })}

            {move || match step.get() {
                WizardStep::SelectFile | WizardStep::Uploading => view! {
                    <SelectFileStep wizard=wizard busy=busy on_file=on_file />
                    <footer class="form-actions">
                        <button
                            class="btn btn-primary"
                            disabled=move || busy.get() || wizard.with(|w| w.file().is_none())
                            on:click=upload
                        >
                            {move || if busy.get() { "Uploading…" } else { "Upload" }}
                        </button>
                    </footer>
                }
                .into_any(),
                WizardStep::Review | WizardStep::Correcting | WizardStep::Processing => view! {
                    <ReviewStep wizard=wizard />
                    <footer class="form-actions">
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || wizard.with(|w| w.skip_invalid_rows())
                                disabled=move || busy.get()
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    wizard.update(|w| w.set_skip_invalid_rows(checked));
                                }
                            />
                            "Skip rows with errors"
                        </label>
                        <button
                            class="btn"
                            disabled=move || busy.get() || !wizard.with(|w| w.has_edits())
                            on:click=move |_| wizard.update(ImportWizard::discard_all)
                        >
                            "Discard edits"
                        </button>
                        <button
                            class="btn"
                            disabled=move || busy.get() || !wizard.with(|w| w.has_edits())
                            on:click=submit_corrections
                        >
                            {move || {
                                let n = wizard.with(|w| w.edited_row_count());
                                if step.get() == WizardStep::Correcting {
                                    "Submitting…".to_string()
                                } else {
                                    format!("Submit corrections ({})", n)
                                }
                            }}
                        </button>
                        <button
                            class="btn btn-primary"
                            disabled=move || !wizard.with(|w| w.can_process())
                            title=move || wizard.with(|w| w.process_blocker().unwrap_or_default().to_string())
                            on:click=process
                        >
                            {move || if step.get() == WizardStep::Processing { "Processing…" } else { "Process rows" }}
                        </button>
                    </footer>
                }
                .into_any(),
                WizardStep::Completed | WizardStep::Reverting => view! {
                    <div class="wizard-result">
                        {move || wizard.with(|w| w.outcome().cloned()).map(|o| view! {
                            <p>{format!("{} rows imported, {} skipped.", o.processed_rows, o.skipped_rows)}</p>
                            {o.message.map(|m| view! { <p class="muted">{m}</p> })}
                        })}
                    </div>
                    <footer class="form-actions">
                        <button class="btn btn-danger" disabled=move || busy.get() on:click=revert>
                            {move || if busy.get() { "Reverting…" } else { "Revert import" }}
                        </button>
                        <button class="btn btn-primary" disabled=move || busy.get() on:click=move |_| on_close.run(())>
                            "Done"
                        </button>
                    </footer>
                }
                .into_any(),
                WizardStep::Reverted => view! {
                    <div class="wizard-result">
                        {move || wizard.with(|w| w.revert_outcome().cloned()).map(|o| view! {
                            <p>{format!("{} rows reverted.", o.reverted_rows)}</p>
                            {o.message.map(|m| view! { <p class="muted">{m}</p> })}
                        })}
                    </div>
                    <footer class="form-actions">
                        <button class="btn" on:click=start_over>"Import another file"</button>
                        <button class="btn btn-primary" on:click=move |_| on_close.run(())>"Close"</button>
                    </footer>
                }
                .into_any(),
                WizardStep::Failed => view! {
                    <footer class="form-actions">
                        <button class="btn" on:click=start_over>"Start over"</button>
                        <button class="btn btn-primary" on:click=move |_| on_close.run(())>"Close"</button>
                    </footer>
                }
                .into_any(),
            }}
        </Modal>
    }
}

#[component]
fn SelectFileStep(
    wizard: RwSignal<ImportWizard>,
    busy: Signal<bool>,
    #[prop(into)] on_file: Callback<web_sys::File>,
) -> impl IntoView {
    view! {
        <div class="wizard-select">
            <p class="muted">
                "Upload a CSV or Excel sheet with one unit per row. The server validates every row before anything is imported."
            </p>
            <FilePicker accept=accept_attribute() on_file=on_file disabled=busy label="Choose file" />
            {move || wizard.with(|w| w.file().cloned()).map(|f| view! {
                <p class="file-chosen">{format!("{} ({})", f.name, format_file_size(f.size))}</p>
            })}
        </div>
    }
}

/// Row table with editable cells. Rows are keyed by row number so an input
/// keeps focus while its value changes.
#[component]
fn ReviewStep(wizard: RwSignal<ImportWizard>) -> impl IntoView {
    let columns = Memo::new(move |_| wizard.with(|w| w.session().map(|s| s.columns.clone()).unwrap_or_default()));
    let row_numbers = Memo::new(move |_| wizard.with(|w| w.rows_for_review()));
    let counts = Memo::new(move |_| wizard.with(|w| w.session().map(|s| s.counts()).unwrap_or_default()));
    let editable = Memo::new(move |_| wizard.with(|w| w.step() == WizardStep::Review));

    view! {
        <div class="wizard-review">
            <div class="row-counts">
                <span class=RowStatus::Success.badge_class()>{move || format!("{} ok", counts.get().success)}</span>
                <span class=RowStatus::Warning.badge_class()>{move || format!("{} warnings", counts.get().warning)}</span>
                <span class=RowStatus::Error.badge_class()>{move || format!("{} errors", counts.get().error)}</span>
                {move || wizard.with(|w| w.session().map(|s| s.file_name.clone())).map(|name| view! {
                    <span class="muted">{name}</span>
                })}
            </div>
            <div class="table-scroll">
                <table class="data-table review-table">
                    <thead>
                        <tr>
                            <th>"Row"</th>
                            <th>"Status"</th>
                            {move || columns.get().into_iter().map(|c| view! { <th>{c}</th> }).collect_view()}
                            <th>"Messages"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || row_numbers.get() key=|row| *row let:row>
                            <ReviewRow wizard=wizard row=row columns=columns editable=editable />
                        </For>
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn ReviewRow(wizard: RwSignal<ImportWizard>, row: u32, columns: Memo<Vec<String>>, editable: Memo<bool>) -> impl IntoView {
    let server_row = Memo::new(move |_| {
        wizard.with(|w| w.session().and_then(|s| s.row(row)).map(|r| (r.status, r.messages.clone())))
    });
    let row_edited = Memo::new(move |_| {
        wizard.with(|w| columns.with(|cols| cols.iter().any(|c| w.is_edited(row, c))))
    });

    let cells = move || {
        columns
            .get()
            .into_iter()
            .map(|column| {
                let read_column = column.clone();
                let edited_column = column.clone();
                view! {
                    <td class=move || if wizard.with(|w| w.is_edited(row, &edited_column)) { "cell edited" } else { "cell" }>
                        <input
                            type="text"
                            disabled=move || !editable.get()
                            prop:value=move || {
                                wizard.with(|w| w.effective_value(row, &read_column).unwrap_or_default().to_string())
                            }
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                let mut result = Ok(());
                                wizard.update(|w| result = w.edit_cell(row, &column, &value));
                                if let Err(e) = result {
                                    tracing::warn!(row, error = %e, "cell edit rejected");
                                }
                            }
                        />
                    </td>
                }
            })
            .collect_view()
    };

    view! {
        <tr class=move || match server_row.get().map(|(status, _)| status) {
            Some(RowStatus::Error) => "row-error",
            Some(RowStatus::Warning) => "row-warning",
            _ => "",
        }>
            <td>{row}</td>
            <td>{move || server_row.get().map(|(status, _)| badge(&status))}</td>
            {cells}
            <td class="row-messages">
                {move || server_row.get().map(|(_, messages)| messages.join("; "))}
            </td>
            <td>
                <Show when=move || row_edited.get()>
                    <button
                        class="btn btn-small"
                        disabled=move || !editable.get()
                        on:click=move |_| wizard.update(|w| w.discard_row(row))
                    >
                        "Undo"
                    </button>
                </Show>
            </td>
        </tr>
    }
}
