//! Mesaza Voting Widget
//!
//! Pack vote and results reveal built with Leptos (WASM).
//!
//! # Features
//!
//! - One vote per browser, remembered in `localStorage`
//! - Confetti celebration on the chosen pack
//! - Suspense countdown with jittering bars before the results show
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The vote rules, the tally and the reveal sequencer come from
//! the `mesaza` core crate; this crate only supplies the browser seams
//! (HTTP, storage, timers) and the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
