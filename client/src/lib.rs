//! # cookbook-client
//!
//! Leptos + WASM single-page frontend for the recipe assistant.
//!
//! This crate contains pages, components, session view state, and the HTTP
//! helpers for the external backend. Session lifecycle rules (token storage,
//! expiry, route guarding) live in the `session` crate; this crate wires them
//! to `localStorage`, `Date.now()`, the router, and timers.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
