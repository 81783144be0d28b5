//! Splitsure landing page
//!
//! Browser app that lets a visitor connect an Ethereum wallet and shows the
//! connected identity. Built with Leptos (CSR) and loaded by `index.html`.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod pages;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use app::App;
use utils::constants::LOADING_ELEMENT_ID;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Splitsure starting");

    if let Err(e) = config::init_config() {
        log::error!("{}; falling back to defaults", e);
    }

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Remove the placeholder shown while the WASM bundle loads.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id(LOADING_ELEMENT_ID) {
        Some(loading_element) => loading_element.remove(),
        None => log::debug!("Loading element '{}' not found", LOADING_ELEMENT_ID),
    }
}
