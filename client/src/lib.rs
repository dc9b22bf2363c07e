//! # client
//!
//! Leptos + WASM frontend for the embed tester: load an app in a frame (host
//! mode) or run inside one (embedded mode), post hand-written messages to
//! the peer window, and log what comes back.
//!
//! Routing rules and state are plain Rust and testable off-browser; web-sys
//! access is confined to `net::browser`, `util::persistence` and the
//! hydrate-gated branches of a few components.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
