//! Item Card Component
//!
//! One tracked character/weapon: image, rarity, element badge, level
//! selectors, material slots and the completion/edit/delete controls.
//! Cards are drag handles for reordering.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::images;
use crate::models::{ItemRecord, LevelField, MaterialCategory};
use crate::store::{persist, use_app_store, AppStateStoreFields};
use leptos_dragdrop::{make_on_card_mouseenter, make_on_mousedown, make_on_mouseleave, DndSignals};

const CURRENT_LEVELS: &[u8] = &[1, 20, 40, 50, 60, 70, 80, 90];
const TARGET_LEVELS: &[u8] = &[20, 40, 50, 60, 70, 80, 90];

#[component]
pub fn ItemCard(item: ItemRecord) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let dnd = expect_context::<DndSignals>();

    let id = item.id.clone();
    let image_src = item
        .image
        .clone()
        .unwrap_or_else(|| images::default_item_image(item.kind));

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_mouseenter = make_on_card_mouseenter(dnd, id.clone());
    let on_mouseleave = make_on_mouseleave(dnd);

    let drag_id = id.clone();
    let is_dragging = move || dnd.dragging_id_read.get().as_deref() == Some(drag_id.as_str());
    let target_id = id.clone();
    let is_drop_target = move || dnd.drop_target_read.get().as_deref() == Some(target_id.as_str());

    let completed = item.completed;
    let card_class = move || {
        let mut c = String::from("material-item");
        if completed {
            c.push_str(" completed");
        }
        if is_dragging() {
            c.push_str(" dragging");
        }
        if is_drop_target() {
            c.push_str(" drop-target");
        }
        c
    };

    let toggle_id = id.clone();
    let on_toggle = move |ev: web_sys::Event| {
        let checked = event_target_checked(&ev);
        let ok = store.items().write().set_completed(&toggle_id, checked).is_ok();
        if ok {
            persist(&store, &ctx);
        }
    };

    let level_handler = move |field: LevelField, item_id: String| {
        move |ev: web_sys::Event| {
            if let Ok(level) = event_target_value(&ev).parse::<u8>() {
                let ok = store.items().write().set_level(&item_id, field, level).is_ok();
                if ok {
                    persist(&store, &ctx);
                }
            }
        }
    };
    let on_current_level = level_handler(LevelField::Current, id.clone());
    let on_target_level = level_handler(LevelField::Target, id.clone());

    let edit_id = id.clone();
    let on_edit = move |_| ctx.open_edit_modal(edit_id.clone());
    let mats_id = id.clone();
    let on_edit_materials = move |_| ctx.open_materials_editor(mats_id.clone());

    let delete_id = id.clone();
    let delete_name = item.name.clone();
    let on_delete = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Are you sure you want to delete \"{delete_name}\"?"
                ))
                .ok()
            })
            .unwrap_or(false);
        if confirmed {
            store.items().write().remove(&delete_id);
            persist(&store, &ctx);
        }
    };

    let has_materials = !item.materials.is_empty();
    let has_ascension = item.has_category(MaterialCategory::Ascension);
    let has_talent = item.has_category(MaterialCategory::Talent);
    let current_level = item.current_level;
    let target_level = item.target_level;
    let element = item.kind.element();
    let materials = item.materials.clone();

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="drag-handle">"⋮⋮"</div>
            <img src=image_src alt=item.name.clone() class="item-image"/>
            <div class="item-content">
                <div class="item-header">
                    <div class="item-title">
                        <h3 class=if completed { "item-name completed" } else { "item-name" }>
                            {item.name.clone()}
                        </h3>
                        <Show when=move || has_materials>
                            <div class="level-selectors">
                                <select class="level-select" on:change=on_current_level.clone()>
                                    {CURRENT_LEVELS.iter().map(|level| view! {
                                        <option value=level.to_string() selected=*level == current_level>
                                            {level.to_string()}
                                        </option>
                                    }).collect_view()}
                                </select>
                                <span class="level-arrow">"→"</span>
                                <select class="level-select" on:change=on_target_level.clone()>
                                    {TARGET_LEVELS.iter().map(|level| view! {
                                        <option value=level.to_string() selected=*level == target_level>
                                            {level.to_string()}
                                        </option>
                                    }).collect_view()}
                                </select>
                            </div>
                        </Show>
                    </div>
                    <div class="item-meta">
                        <div class="item-rarity">{item.rarity.stars()}</div>
                        <span class="item-tag">{item.kind.type_str()}</span>
                        {element.map(|e| view! {
                            <span class=format!("item-element {}", e.as_str())>{e.label()}</span>
                        })}
                        {has_ascension.then(|| view! {
                            <span class="item-tag">"Ascension Materials"</span>
                        })}
                        {has_talent.then(|| view! {
                            <span class="item-tag">"Talent Materials"</span>
                        })}
                    </div>
                </div>
                <div class="materials-grid">
                    <Show
                        when=move || has_materials
                        fallback=|| view! {
                            <div class="material-slot">
                                <div class="material-name">"No materials added"</div>
                            </div>
                        }
                    >
                        {materials.iter().map(|mat| {
                            let src = mat.image.clone().unwrap_or_else(images::default_material_image);
                            let count_class = if mat.is_complete() {
                                "material-count complete"
                            } else {
                                "material-count incomplete"
                            };
                            view! {
                                <div class="material-slot">
                                    <img src=src alt=mat.name.clone() class="material-image"/>
                                    <div class="material-name">{mat.name.clone()}</div>
                                    <div class=count_class>
                                        {format!("{}/{}", mat.obtained, mat.required)}
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </Show>
                </div>
                <div class="item-actions">
                    <div class="completion-controls">
                        <label class="checkbox-label">
                            <input type="checkbox" checked=completed on:change=on_toggle/>
                            "Completed"
                        </label>
                        <button class="btn-edit" on:click=on_edit>"Edit Item"</button>
                        <button class="btn-edit-materials" on:click=on_edit_materials>
                            "Edit Materials"
                        </button>
                    </div>
                    <button class="btn-delete" title="Delete item" on:click=on_delete>"⌫"</button>
                </div>
            </div>
        </div>
    }
}
