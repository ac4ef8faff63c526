//! ACS Dashboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod markdown;
mod pages;
mod store;
mod toast;

use app::App;
use leptos::prelude::*;
use tracing_wasm::WASMLayerConfigBuilder;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let config = WASMLayerConfigBuilder::default().set_max_level(level).build();
    tracing_wasm::set_as_global_default_with_config(config);

    tracing::info!("Starting ACS dashboard");
    mount_to_body(App);
}
