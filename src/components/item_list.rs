//! Item List Component
//!
//! "In Progress" and "Completed" sections with counts and empty states,
//! filtered by the active key.

use leptos::prelude::*;

use crate::components::ItemCard;
use crate::context::use_app_context;
use crate::filter::{self, FilterKey};
use crate::models::ItemRecord;
use crate::store::{use_app_store, AppStateStoreFields};

type CardKey = (String, String, bool, u32, u8, u8, Option<String>, Vec<(String, u32, u32, bool)>);

// Tuple of all rendered fields so edits cause a re-render
fn card_key(item: &ItemRecord) -> CardKey {
    (
        item.id.clone(),
        item.name.clone(),
        item.completed,
        item.priority,
        item.current_level,
        item.target_level,
        item.image.clone(),
        item.materials
            .iter()
            .map(|m| (m.name.clone(), m.obtained, m.required, m.image.is_some()))
            .collect(),
    )
}

#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let visible = move || {
        let key = ctx.current_filter.get();
        store.items().with(|s| filter::filter(s.items(), key))
    };
    let in_progress = move || -> Vec<ItemRecord> {
        visible().into_iter().filter(|i| !i.completed).collect()
    };
    let completed = move || -> Vec<ItemRecord> {
        visible().into_iter().filter(|i| i.completed).collect()
    };

    // Section headers count the whole store, not the filtered view
    let in_progress_count = move || store.items().with(|s| s.in_progress_count());
    let completed_count = move || store.items().with(|s| s.completed_count());
    let count_label = |n: usize| format!("{} item{}", n, if n == 1 { "" } else { "s" });

    view! {
        <section class="item-section">
            <div class="section-header">
                <h2>"In Progress"</h2>
                <span class="item-count">{move || count_label(in_progress_count())}</span>
            </div>
            <Show
                when=move || !in_progress().is_empty()
                fallback=move || view! {
                    <div class="empty-state">
                        <h3>"No items in progress"</h3>
                        <p>"Add your first character or weapon to get started!"</p>
                        <Show when=move || ctx.current_filter.get() == FilterKey::All>
                            <button class="btn-primary" on:click=move |_| ctx.open_add_modal()>
                                "Add your first item"
                            </button>
                        </Show>
                    </div>
                }
            >
                <div class="item-grid">
                    <For
                        each=in_progress
                        key=card_key
                        children=move |item| view! { <ItemCard item=item/> }
                    />
                </div>
            </Show>
        </section>

        <section class="item-section">
            <div class="section-header">
                <h2>"Completed"</h2>
                <span class="item-count">{move || count_label(completed_count())}</span>
            </div>
            <Show
                when=move || !completed().is_empty()
                fallback=move || view! {
                    <div class="empty-state">
                        <h3>"No completed items"</h3>
                        <p>"Mark items as completed to see them here."</p>
                    </div>
                }
            >
                <div class="item-grid">
                    <For
                        each=completed
                        key=card_key
                        children=move |item| view! { <ItemCard item=item/> }
                    />
                </div>
            </Show>
        </section>
    }
}
