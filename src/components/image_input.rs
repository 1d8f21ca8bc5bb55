//! Image Input Component
//!
//! File picker with preview. The selected file is validated and read into a
//! data-URL immediately; the preview signal is what a form submission
//! stores, and closing the modal throws it away.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::components::alert;
use crate::images;

#[component]
pub fn ImageInput(
    preview: ReadSignal<Option<String>>,
    set_preview: WriteSignal<Option<String>>,
) -> impl IntoView {
    let (file_name, set_file_name) = signal(None::<String>);

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let name = file.name();
        spawn_local(async move {
            match images::read_as_data_url(file).await {
                Ok(url) => {
                    set_preview.set(Some(url));
                    set_file_name.set(Some(name));
                }
                Err(e) => {
                    alert(&format!("Please select a valid image file: {e}"));
                    input.set_value("");
                }
            }
        });
    };

    view! {
        <div class="image-input">
            <label class=move || {
                if preview.get().is_some() { "file-input-label has-file" } else { "file-input-label" }
            }>
                <span>
                    {move || if preview.get().is_some() {
                        "📷 Change Image"
                    } else {
                        "📷 Choose Image (JPG, PNG, SVG...)"
                    }}
                </span>
                <input type="file" accept="image/*" on:change=on_change/>
            </label>
            {move || preview.get().map(|src| view! {
                <div class="file-preview">
                    <img src=src class="preview-image"/>
                    <span class="file-name">
                        {file_name.get().unwrap_or_else(|| "Current image".to_string())}
                    </span>
                </div>
            })}
        </div>
    }
}
