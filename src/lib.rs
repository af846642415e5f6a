//! # tutorlink
//!
//! Leptos + WASM frontend for the TutorLink tutoring marketplace: students
//! browse tutors, book availability slots, and pay through a hosted checkout;
//! tutors manage profiles, availability, and bookings.
//!
//! The application is a presentation and state-synchronization layer over a
//! remote REST API. Its core is the session lifecycle: a persisted session
//! store, an HTTP client that injects bearer tokens and transparently
//! refreshes expired ones, a session context hydrated once per page load, and
//! a role-based route guard.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod storage;
pub mod util;

/// Browser entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);
}
