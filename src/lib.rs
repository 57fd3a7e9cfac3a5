//! # antenna-admin
//!
//! Leptos + WASM administrative front-end for managing antenna
//! field-equipment records against a session-authenticated backend API.
//!
//! This crate contains pages, components, application stores (session,
//! antennas, UF reference data), the HTTP transport, and the navigation
//! guard. The backend is an external collaborator reached over
//! cookie-based Sanctum-style authentication.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// Browser entry point: installs panic/log hooks and hydrates the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
