//! Application Context
//!
//! Shared state provided via Leptos Context API.

use acs_domain::ApiConfig;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, ApiError};
use crate::toast::{ToastKind, ToastQueue};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload data from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload data from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Visible toasts - read
    pub toasts: ReadSignal<ToastQueue>,
    set_toasts: WriteSignal<ToastQueue>,
    /// Effective configuration - read
    pub config: ReadSignal<ApiConfig>,
    set_config: WriteSignal<ApiConfig>,
}

impl AppContext {
    pub fn new(config: ApiConfig) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (toasts, set_toasts) = signal(ToastQueue::default());
        let (config, set_config) = signal(config);
        Self {
            reload_trigger,
            set_reload_trigger,
            toasts,
            set_toasts,
            config,
            set_config,
        }
    }

    /// Trigger a reload of every mounted list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// HTTP client for the current configuration
    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.config.get_untracked())
    }

    pub fn page_size(&self) -> usize {
        self.config.with_untracked(|c| c.page_size)
    }

    pub fn currency(&self) -> String {
        self.config.with_untracked(|c| c.currency.clone())
    }

    /// Replace the configuration (settings page) and refetch everything
    pub fn set_config(&self, config: ApiConfig) {
        tracing::info!(base_url = %config.base_url, "configuration changed");
        self.set_config.set(config);
        self.reload();
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = 0;
        self.set_toasts.update(|q| id = q.push(kind, message));

        let timeout = self.config.with_untracked(|c| c.toast_timeout_ms);
        // Errors stay up twice as long
        let timeout = if kind == ToastKind::Error { timeout.saturating_mul(2) } else { timeout };
        let set_toasts = self.set_toasts;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            set_toasts.update(|q| {
                q.dismiss(id);
            });
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|q| {
            q.dismiss(id);
        });
    }

    /// Show a failed load
    pub fn report(&self, err: &ApiError) {
        tracing::warn!(error = %err, "request failed");
        self.notify(ToastKind::Error, err.to_string());
    }

    /// Show a failed mutation and refetch, since local state may be stale
    pub fn mutation_failed(&self, err: &ApiError) {
        self.report(err);
        if !matches!(err, ApiError::Domain(_)) {
            self.reload();
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
