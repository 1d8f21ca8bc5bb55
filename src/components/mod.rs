//! UI Components
//!
//! Reusable Leptos components.

mod filter_bar;
mod image_input;
mod item_card;
mod item_form;
mod item_list;
mod materials_editor;

pub use filter_bar::FilterBar;
pub use image_input::ImageInput;
pub use item_card::ItemCard;
pub use item_form::ItemForm;
pub use item_list::ItemList;
pub use materials_editor::MaterialsEditor;

/// Blocking user-visible message, matching the browser-alert prompts the
/// tracker uses for validation failures
pub(crate) fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}
