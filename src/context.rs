//! Application Context
//!
//! Session state (active filter, open modals, persistence warning) as one
//! explicit struct provided via the Leptos Context API, instead of
//! free-floating globals.

use leptos::prelude::*;

use crate::filter::FilterKey;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Active filter-bar key - read
    pub current_filter: ReadSignal<FilterKey>,
    set_current_filter: WriteSignal<FilterKey>,
    /// Whether the add/edit modal is open - read
    pub show_item_modal: ReadSignal<bool>,
    set_show_item_modal: WriteSignal<bool>,
    /// Item loaded into the add/edit modal (None = adding) - read
    pub editing_item: ReadSignal<Option<String>>,
    set_editing_item: WriteSignal<Option<String>>,
    /// Item whose materials editor is open - read
    pub editing_materials: ReadSignal<Option<String>>,
    set_editing_materials: WriteSignal<Option<String>>,
    /// Non-fatal persistence warning banner - read
    pub storage_warning: ReadSignal<Option<String>>,
    set_storage_warning: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new() -> Self {
        let (current_filter, set_current_filter) = signal(FilterKey::All);
        let (show_item_modal, set_show_item_modal) = signal(false);
        let (editing_item, set_editing_item) = signal(None::<String>);
        let (editing_materials, set_editing_materials) = signal(None::<String>);
        let (storage_warning, set_storage_warning) = signal(None::<String>);
        Self {
            current_filter,
            set_current_filter,
            show_item_modal,
            set_show_item_modal,
            editing_item,
            set_editing_item,
            editing_materials,
            set_editing_materials,
            storage_warning,
            set_storage_warning,
        }
    }

    pub fn set_filter(&self, key: FilterKey) {
        self.set_current_filter.set(key);
    }

    /// Open the modal for a new item
    pub fn open_add_modal(&self) {
        self.set_editing_item.set(None);
        self.set_show_item_modal.set(true);
    }

    /// Open the modal prefilled with an existing item
    pub fn open_edit_modal(&self, item_id: String) {
        self.set_editing_item.set(Some(item_id));
        self.set_show_item_modal.set(true);
    }

    /// Close the add/edit modal, discarding pending form state
    pub fn close_item_modal(&self) {
        self.set_show_item_modal.set(false);
        self.set_editing_item.set(None);
    }

    pub fn open_materials_editor(&self, item_id: String) {
        self.set_editing_materials.set(Some(item_id));
    }

    pub fn close_materials_editor(&self) {
        self.set_editing_materials.set(None);
    }

    pub fn warn_storage(&self, message: &str) {
        self.set_storage_warning.set(Some(message.to_string()));
    }

    pub fn clear_storage_warning(&self) {
        self.set_storage_warning.set(None);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
