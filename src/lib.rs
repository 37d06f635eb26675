//! # hanzi-client
//!
//! Leptos + WASM frontend for the hanzi spaced-repetition study service.
//!
//! This crate contains pages, components, application state, the typed REST
//! facade, and browser storage glue. Scheduling lives on the server; this
//! crate only persists the session, talks to the API, and orders what the
//! API returns.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and mounts the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
