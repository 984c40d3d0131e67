//! Confetti Component
//!
//! Renders a [`ConfettiBurst`] as absolutely positioned pieces inside the
//! celebrating element.

use leptos::*;
use mesaza::ConfettiBurst;

/// One burst of confetti, plus the glow for vote celebrations
#[component]
pub fn Confetti(burst: ConfettiBurst) -> impl IntoView {
    let glow = burst.style.has_glow();

    view! {
        {glow.then(|| view! { <div class="celebrate-glow" /> })}
        {burst.pieces.into_iter().map(|piece| view! {
            <div class="confetti" style=piece.css() />
        }).collect_view()}
    }
}

/// Put `value` in `signal` and clear it again after `cleanup_ms`
pub fn celebrate<T: 'static>(signal: RwSignal<Option<T>>, value: T, cleanup_ms: u32) {
    signal.set(Some(value));

    gloo_timers::callback::Timeout::new(cleanup_ms, move || {
        signal.set(None);
    }).forget();
}
