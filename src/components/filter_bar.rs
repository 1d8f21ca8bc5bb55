//! Filter Bar Component
//!
//! Row of filter buttons; the active key drives which items are visible.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::filter::FilterKey;

/// Key/label pairs in display order
const FILTERS: &[(&str, &str)] = &[
    ("all", "All"),
    ("in-progress", "In Progress"),
    ("completed", "Completed"),
    ("character-4", "4★ Characters"),
    ("character-5", "5★ Characters"),
    ("weapon-4", "4★ Weapons"),
    ("weapon-5", "5★ Weapons"),
    ("pyro", "Pyro"),
    ("hydro", "Hydro"),
    ("dendro", "Dendro"),
    ("geo", "Geo"),
    ("cryo", "Cryo"),
    ("anemo", "Anemo"),
    ("electro", "Electro"),
    ("ascension-materials", "Ascension Materials"),
    ("talent-materials", "Talent Materials"),
];

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="filter-bar">
            {FILTERS.iter().map(|(key, label)| {
                let filter = FilterKey::from_key(key);
                let is_active = move || ctx.current_filter.get() == filter;
                view! {
                    <button
                        class=move || if is_active() { "btn-filter active" } else { "btn-filter" }
                        on:click=move |_| ctx.set_filter(filter)
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
