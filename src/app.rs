//! Application Shell
//!
//! Loads the persisted snapshot once, wires the context, drag-drop and
//! modals, and lays out the filter bar above the two item sections.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{FilterBar, ItemForm, ItemList, MaterialsEditor};
use crate::context::AppContext;
use crate::persistence;
use crate::store::{persist, AppState, AppStateStoreFields, ProgressStore};
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};

#[component]
pub fn App() -> impl IntoView {
    // State lives only as long as the page; loaded once, saved after every
    // mutation
    let items = ProgressStore::from_items(persistence::load_snapshot());
    web_sys::console::log_1(&format!("[APP] loaded {} items", items.items().len()).into());

    let store = Store::new(AppState::new(items));
    provide_context(store);

    let ctx = AppContext::new();
    provide_context(ctx);

    // Drag-reorder: drop a card on another card to splice before it
    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_mouseup(dnd, move |dragged_id, target_id| {
        let result = store.items().write().reorder(&dragged_id, &target_id);
        match result {
            Ok(()) => persist(&store, &ctx),
            Err(e) => web_sys::console::warn_1(&format!("[DND] reorder failed: {e}").into()),
        }
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Ascension Tracker"</h1>
                <button class="btn-primary" on:click=move |_| ctx.open_add_modal()>
                    "+ Add Item"
                </button>
            </header>

            {move || ctx.storage_warning.get().map(|warning| view! {
                <div class="storage-warning">
                    <span>{warning}</span>
                    <button on:click=move |_| ctx.clear_storage_warning()>"✕"</button>
                </div>
            })}

            <FilterBar/>

            <main class="main-content">
                <ItemList/>
            </main>

            <Show when=move || ctx.show_item_modal.get()>
                <ItemForm/>
            </Show>

            <Show when=move || ctx.editing_materials.get().is_some()>
                <MaterialsEditor/>
            </Show>
        </div>
    }
}
