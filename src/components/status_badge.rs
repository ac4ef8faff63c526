//! Status Badge Component

use acs_domain::Badge;
use leptos::prelude::*;

#[component]
pub fn StatusBadge(#[prop(into)] label: String, class: &'static str) -> impl IntoView {
    view! { <span class=class>{label}</span> }
}

/// Badge view for anything implementing [`Badge`]
pub fn badge<B: Badge>(badge: &B) -> impl IntoView {
    view! { <StatusBadge label=badge.label() class=badge.badge_class() /> }
}
