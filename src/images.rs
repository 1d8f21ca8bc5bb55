//! Image Handling
//!
//! File validation, the single-shot FileReader read to a data-URL, and the
//! generated placeholder images. A read is always awaited inside the one
//! form submission that requested it; closing the modal discards the
//! pending preview, so a stale completion never reaches the store.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::TrackerError;
use crate::models::ItemKind;

/// Selected files above this are rejected before anything is read
pub const MAX_UPLOAD_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

/// Reject non-images and oversized files before they enter a record
pub fn validate_file(file: &web_sys::File) -> Result<(), TrackerError> {
    if !file.type_().starts_with("image/") {
        return Err(TrackerError::Decode(format!(
            "not an image file: {}",
            file.name()
        )));
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(TrackerError::Decode("image larger than 5 MB".into()));
    }
    Ok(())
}

/// Read a validated file into a data-URL
pub async fn read_as_data_url(file: web_sys::File) -> Result<String, TrackerError> {
    validate_file(&file)?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let reader = match web_sys::FileReader::new() {
            Ok(r) => r,
            Err(_) => {
                let _ = reject.call0(&JsValue::NULL);
                return;
            }
        };

        let onload_reader = reader.clone();
        let onload_reject = reject.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            match onload_reader.result() {
                Ok(value) => {
                    let _ = resolve.call1(&JsValue::NULL, &value);
                }
                Err(err) => {
                    let _ = onload_reject.call1(&JsValue::NULL, &err);
                }
            }
        });
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror_reject = reject.clone();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            let _ = onerror_reject.call0(&JsValue::NULL);
        });
        reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        if reader.read_as_data_url(&file).is_err() {
            let _ = reject.call0(&JsValue::NULL);
        }
    });

    let value = JsFuture::from(promise)
        .await
        .map_err(|_| TrackerError::Decode("file read failed".into()))?;
    value
        .as_string()
        .ok_or_else(|| TrackerError::Decode("file read returned no data".into()))
}

/// Placeholder shown when an item has no uploaded image
pub fn default_item_image(kind: ItemKind) -> String {
    match kind {
        ItemKind::Character { .. } => concat!(
            "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">",
            "<circle fill=\"%23e5a6b2\" cx=\"50\" cy=\"50\" r=\"40\"/>",
            "<text y=\"60\" x=\"50\" text-anchor=\"middle\" fill=\"white\" font-size=\"30\">👤</text></svg>"
        )
        .to_string(),
        ItemKind::Weapon => concat!(
            "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">",
            "<rect fill=\"%23e5a6b2\" width=\"100\" height=\"100\" rx=\"10\"/>",
            "<text y=\"60\" x=\"50\" text-anchor=\"middle\" fill=\"white\" font-size=\"30\">⚔️</text></svg>"
        )
        .to_string(),
    }
}

/// Placeholder for materials without an image
pub fn default_material_image() -> String {
    concat!(
        "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">",
        "<rect fill=\"%23ddd\" width=\"100\" height=\"100\" rx=\"10\"/>",
        "<text y=\"60\" x=\"50\" text-anchor=\"middle\" fill=\"%23666\" font-size=\"16\">MAT</text></svg>"
    )
    .to_string()
}
