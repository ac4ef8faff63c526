//! Options for the record pickers in the dialogs, fetched when a dialog
//! opens.

use acs_domain::PickerOption;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;

/// Every unit, labelled for a picker
pub fn asset_options() -> ReadSignal<Vec<PickerOption>> {
    let ctx = use_app_context();
    let (options, set_options) = signal(Vec::new());
    let api = ctx.api();
    spawn_local(async move {
        match api::list_assets(&api, None).await {
            Ok(assets) => set_options.set(assets.iter().map(|a| a.picker_option()).collect()),
            Err(e) => ctx.report(&e),
        }
    });
    options
}
