//! Item Form Component
//!
//! Add/edit modal. The element selector, level selectors and talent
//! checkbox come and go with the selected type; presence validation blocks
//! the submit with an alert, leaving the store untouched.

use leptos::prelude::*;

use crate::components::{alert, ImageInput};
use crate::context::use_app_context;
use crate::error::TrackerError;
use crate::models::{
    Element, ItemInput, ItemKind, MaterialCategory, Rarity, MAX_LEVEL, MIN_LEVEL,
};
use crate::store::{persist, use_app_store, AppStateStoreFields};

const CURRENT_LEVELS: &[u8] = &[1, 20, 40, 50, 60, 70, 80, 90];
const TARGET_LEVELS: &[u8] = &[20, 40, 50, 60, 70, 80, 90];

#[component]
pub fn ItemForm() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    // The modal is remounted on every open, so seed everything here
    let existing = ctx
        .editing_item
        .get_untracked()
        .and_then(|id| store.items().with_untracked(|s| s.get(&id).cloned()));
    let is_edit = existing.is_some();

    let (name, set_name) = signal(existing.as_ref().map(|i| i.name.clone()).unwrap_or_default());
    let (type_str, set_type_str) = signal(
        existing
            .as_ref()
            .map(|i| i.kind.type_str().to_string())
            .unwrap_or_default(),
    );
    let (rarity_str, set_rarity_str) = signal(
        existing
            .as_ref()
            .map(|i| u8::from(i.rarity).to_string())
            .unwrap_or_default(),
    );
    let (element_str, set_element_str) = signal(
        existing
            .as_ref()
            .and_then(|i| i.kind.element())
            .map(|e| e.as_str().to_string())
            .unwrap_or_default(),
    );
    let (notes, set_notes) = signal(existing.as_ref().map(|i| i.notes.clone()).unwrap_or_default());
    let (current_level, set_current_level) =
        signal(existing.as_ref().map(|i| i.current_level).unwrap_or(MIN_LEVEL));
    let (target_level, set_target_level) =
        signal(existing.as_ref().map(|i| i.target_level).unwrap_or(MAX_LEVEL));
    let (include_ascension, set_include_ascension) = signal(
        existing
            .as_ref()
            .map(|i| i.has_category(MaterialCategory::Ascension))
            .unwrap_or(true),
    );
    let (include_talent, set_include_talent) = signal(
        existing
            .as_ref()
            .map(|i| i.has_category(MaterialCategory::Talent))
            .unwrap_or(false),
    );
    let (preview, set_preview) = signal(existing.as_ref().and_then(|i| i.image.clone()));

    let is_character = move || type_str.get() == "character";
    let has_type = move || !type_str.get().is_empty();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let item_name = name.get();
        let ty = type_str.get();
        let ra = rarity_str.get();
        if item_name.trim().is_empty() || ty.is_empty() || ra.is_empty() {
            alert("Please fill in all required fields (Name, Type, Rarity)");
            return;
        }
        let kind = if ty == "character" {
            match Element::from_str(&element_str.get()) {
                Some(element) => ItemKind::Character { element },
                None => {
                    alert("Please select an element for characters");
                    return;
                }
            }
        } else {
            ItemKind::Weapon
        };
        let Some(rarity) = ra.parse::<u8>().ok().and_then(|v| Rarity::try_from(v).ok()) else {
            alert("Please select a rarity");
            return;
        };

        let input = ItemInput {
            name: item_name,
            kind,
            rarity,
            notes: notes.get(),
            current_level: current_level.get(),
            target_level: target_level.get(),
            include_ascension: include_ascension.get(),
            include_talent: include_talent.get() && kind.is_character(),
            image: preview.get(),
        };

        let result = match ctx.editing_item.get_untracked() {
            Some(id) => store.items().write().update(&id, input).map(|_| ()),
            None => store.items().write().create(input).map(|_| ()),
        };
        match result {
            Ok(()) => {
                persist(&store, &ctx);
                ctx.close_item_modal();
            }
            Err(TrackerError::Validation(msg)) => alert(&msg),
            Err(e) => {
                web_sys::console::warn_1(&format!("[FORM] edit failed: {e}").into());
                ctx.close_item_modal();
            }
        }
    };

    // Clicking the backdrop (not the dialog) discards the pending form
    let on_backdrop = move |ev: web_sys::MouseEvent| {
        if ev.target() == ev.current_target() {
            ctx.close_item_modal();
        }
    };

    view! {
        <div class="modal show" on:click=on_backdrop>
            <div class="modal-content">
                <h2>{if is_edit { "Edit Item" } else { "Add New Item" }}</h2>
                <form on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Name *"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />

                    <select
                        prop:value=move || type_str.get()
                        on:change=move |ev| set_type_str.set(event_target_value(&ev))
                    >
                        <option value="">"Select type *"</option>
                        <option value="character">"Character"</option>
                        <option value="weapon">"Weapon"</option>
                    </select>

                    <select
                        prop:value=move || rarity_str.get()
                        on:change=move |ev| set_rarity_str.set(event_target_value(&ev))
                    >
                        <option value="">"Select rarity *"</option>
                        <option value="4">"4★"</option>
                        <option value="5">"5★"</option>
                    </select>

                    <Show when=is_character>
                        <select
                            prop:value=move || element_str.get()
                            on:change=move |ev| set_element_str.set(event_target_value(&ev))
                        >
                            <option value="">"Select element *"</option>
                            {Element::ALL.iter().map(|e| view! {
                                <option value=e.as_str()>{e.label()}</option>
                            }).collect_view()}
                        </select>
                    </Show>

                    <Show when=has_type>
                        <div class="level-selector">
                            <label>"Level"</label>
                            <select
                                prop:value=move || current_level.get().to_string()
                                on:change=move |ev| {
                                    if let Ok(level) = event_target_value(&ev).parse() {
                                        set_current_level.set(level);
                                    }
                                }
                            >
                                {CURRENT_LEVELS.iter().map(|level| view! {
                                    <option value=level.to_string()>{level.to_string()}</option>
                                }).collect_view()}
                            </select>
                            <span class="level-arrow">"→"</span>
                            <select
                                prop:value=move || target_level.get().to_string()
                                on:change=move |ev| {
                                    if let Ok(level) = event_target_value(&ev).parse() {
                                        set_target_level.set(level);
                                    }
                                }
                            >
                                {TARGET_LEVELS.iter().map(|level| view! {
                                    <option value=level.to_string()>{level.to_string()}</option>
                                }).collect_view()}
                            </select>
                        </div>
                    </Show>

                    <label class="checkbox-label">
                        <input
                            type="checkbox"
                            checked=include_ascension.get_untracked()
                            on:change=move |ev| set_include_ascension.set(event_target_checked(&ev))
                        />
                        "Ascension Materials"
                    </label>

                    <Show when=is_character>
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                checked=include_talent.get_untracked()
                                on:change=move |ev| set_include_talent.set(event_target_checked(&ev))
                            />
                            "Talent Materials"
                        </label>
                    </Show>

                    <ImageInput preview=preview set_preview=set_preview/>

                    <textarea
                        placeholder="Notes"
                        prop:value=move || notes.get()
                        on:input=move |ev| set_notes.set(event_target_value(&ev))
                    />

                    <div class="modal-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| ctx.close_item_modal()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary">
                            {if is_edit { "Update Item" } else { "Add Item" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
