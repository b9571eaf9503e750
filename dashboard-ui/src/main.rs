//! Traffic Dashboard
//!
//! Browser front end for the traffic analytics backend, built with Leptos (WASM).
//!
//! # Features
//!
//! - Live snapshot polling (density, vehicle count, signal lights)
//! - Camera frame preview
//! - Signal timing configuration
//! - Traffic history graph
//! - Video upload/delete and webcam switching
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The `traffic-dashboard` core decides what every widget shows;
//! this crate fetches with `gloo-net`, runs timers with `gloo-timers` and
//! renders the result through reactive signals.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
