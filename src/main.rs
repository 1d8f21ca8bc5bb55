//! Ascension Tracker Entry Point

mod app;
mod components;
mod context;
mod error;
mod filter;
mod images;
mod models;
mod persistence;
mod store;
mod templates;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
