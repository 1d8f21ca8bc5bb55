//! Materials Editor Component
//!
//! Modal for one item's material list: counts, required amounts, renames,
//! per-material images, custom materials. Mutations hit the in-memory store
//! immediately; Save persists the snapshot, Cancel just closes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::components::alert;
use crate::context::use_app_context;
use crate::error::TrackerError;
use crate::images;
use crate::models::MaterialRecord;
use crate::store::{persist, use_app_store, AppStateStoreFields};

type MaterialKey = (String, String, u32, u32, bool);

fn material_key(mat: &MaterialRecord) -> MaterialKey {
    (
        mat.id.clone(),
        mat.name.clone(),
        mat.obtained,
        mat.required,
        mat.image.is_some(),
    )
}

#[component]
pub fn MaterialsEditor() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    // Remounted per open; the edited item is fixed for the modal's lifetime
    let item_id = ctx.editing_materials.get_untracked().unwrap_or_default();

    let title_id = item_id.clone();
    let item_name = move || {
        store
            .items()
            .with(|s| s.get(&title_id).map(|i| i.name.clone()))
            .unwrap_or_default()
    };
    let mats_id = item_id.clone();
    let materials = move || -> Vec<MaterialRecord> {
        store
            .items()
            .with(|s| s.get(&mats_id).map(|i| i.materials.clone()))
            .unwrap_or_default()
    };

    let (custom_name, set_custom_name) = signal(String::new());

    let add_id = item_id.clone();
    let on_add_custom = move |_| {
        let name = custom_name.get();
        match store.items().write().add_custom_material(&add_id, &name) {
            Ok(()) => set_custom_name.set(String::new()),
            Err(TrackerError::Validation(msg)) => alert(&msg),
            Err(e) => web_sys::console::warn_1(&format!("[MATERIALS] {e}").into()),
        }
    };

    let on_save = move |_| {
        persist(&store, &ctx);
        ctx.close_materials_editor();
    };

    let on_backdrop = move |ev: web_sys::MouseEvent| {
        if ev.target() == ev.current_target() {
            ctx.close_materials_editor();
        }
    };

    let row_item_id = item_id.clone();
    view! {
        <div class="modal show" on:click=on_backdrop>
            <div class="modal-content">
                <h2>{move || format!("Edit Materials — {}", item_name())}</h2>
                <div class="materials-editor">
                    <For
                        each=materials
                        key=material_key
                        children=move |mat| {
                            let item_id = row_item_id.clone();
                            let mat_id = mat.id.clone();
                            let image_src = mat
                                .image
                                .clone()
                                .unwrap_or_else(images::default_material_image);

                            let dec = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |_| {
                                    let _ = store.items().write().adjust_material_count(&item_id, &mat_id, -1);
                                }
                            };
                            let inc = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |_| {
                                    let _ = store.items().write().adjust_material_count(&item_id, &mat_id, 1);
                                }
                            };
                            let on_count = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |ev: web_sys::Event| {
                                    let value = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                                    let _ = store.items().write().set_material_count(&item_id, &mat_id, value);
                                }
                            };
                            let on_required = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |ev: web_sys::Event| {
                                    let value = event_target_value(&ev).parse::<u32>().unwrap_or(1);
                                    let _ = store.items().write().set_material_required(&item_id, &mat_id, value);
                                }
                            };
                            let on_rename = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |ev: web_sys::Event| {
                                    let name = event_target_value(&ev);
                                    let _ = store.items().write().rename_material(&item_id, &mat_id, &name);
                                }
                            };
                            let on_image = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |ev: web_sys::Event| {
                                    let Some(input) = ev
                                        .target()
                                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                                    else {
                                        return;
                                    };
                                    let Some(file) = input.files().and_then(|files| files.get(0)) else {
                                        return;
                                    };
                                    let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                    spawn_local(async move {
                                        match images::read_as_data_url(file).await {
                                            Ok(url) => {
                                                let _ = store
                                                    .items()
                                                    .write()
                                                    .set_material_image(&item_id, &mat_id, url);
                                            }
                                            Err(e) => alert(&format!("Please select a valid image file: {e}")),
                                        }
                                    });
                                }
                            };
                            let on_remove = {
                                let (item_id, mat_id) = (item_id.clone(), mat_id.clone());
                                move |_| {
                                    let _ = store.items().write().remove_material(&item_id, &mat_id);
                                }
                            };

                            view! {
                                <div class="material-editor-item">
                                    <div class="material-editor-image-container">
                                        <img src=image_src alt=mat.name.clone() class="material-editor-image"/>
                                        <label class="btn-change-image">
                                            "📷"
                                            <input type="file" accept="image/*" on:change=on_image/>
                                        </label>
                                    </div>
                                    <div class="material-editor-info">
                                        <input
                                            type="text"
                                            class="material-editor-name-input"
                                            placeholder="Material name"
                                            prop:value=mat.name.clone()
                                            on:change=on_rename
                                        />
                                        <div class="material-editor-controls">
                                            <div class="material-counter">
                                                <button type="button" class="counter-btn" on:click=dec>"-"</button>
                                                <input
                                                    type="number"
                                                    class="counter-input"
                                                    min="0"
                                                    max="9999"
                                                    prop:value=mat.obtained.to_string()
                                                    on:change=on_count
                                                />
                                                <button type="button" class="counter-btn" on:click=inc>"+"</button>
                                            </div>
                                            <span class="required-amount">{format!("/ {}", mat.required)}</span>
                                            <input
                                                type="number"
                                                class="required-input"
                                                min="1"
                                                max="9999"
                                                placeholder="Required"
                                                prop:value=mat.required.to_string()
                                                on:change=on_required
                                            />
                                            <button type="button" class="btn-delete" title="Remove material" on:click=on_remove>
                                                "⌫"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />

                    <div class="add-material-row">
                        <input
                            type="text"
                            placeholder="New material name"
                            prop:value=move || custom_name.get()
                            on:input=move |ev| set_custom_name.set(event_target_value(&ev))
                        />
                        <button type="button" class="btn-secondary" on:click=on_add_custom>
                            "Add Material"
                        </button>
                    </div>
                </div>

                <div class="modal-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| ctx.close_materials_editor()>
                        "Cancel"
                    </button>
                    <button type="button" class="btn-primary" on:click=on_save>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
