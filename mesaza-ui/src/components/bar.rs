//! Result Bar Component
//!
//! A single column of the results chart. Height changes animate through a
//! CSS transition; the page learns that the final height was reached via
//! `transitionend`.

use leptos::*;

use mesaza::{Chapter, ConfettiBurst};

use crate::components::Confetti;

/// Inline style for a bar of `height_px`
pub fn height_style(height_px: u32) -> String {
    format!("height:{}px", height_px)
}

/// Result bar component
#[component]
pub fn ResultBar(
    chapter: Chapter,
    #[prop(into)]
    height: Signal<u32>,
    #[prop(into)]
    label: Signal<String>,
    #[prop(into)]
    aria_label: Signal<String>,
    #[prop(into)]
    winner: Signal<bool>,
    #[prop(into)]
    confetti: Signal<Option<ConfettiBurst>>,
    /// Called when a height transition ends
    #[prop(into)]
    on_settled: Callback<()>,
) -> impl IntoView {
    let name = chapter.name;
    let alt = name.clone();

    view! {
        <div
            class=move || if winner.get() { "bar-wrapper winner" } else { "bar-wrapper" }
            data-id=chapter.id.to_string()
        >
            <div
                class="bar"
                role="img"
                aria-label=move || aria_label.get()
                style=move || height_style(height.get())
                on:transitionend=move |_| on_settled.call(())
            >
                <div class="bar-label">{move || label.get()}</div>
            </div>

            <div class="bar-meta">
                <img class="bar-image" src=chapter.image_url alt=alt />
                <div class="bar-name">{name}</div>
            </div>

            {move || confetti.get().map(|burst| view! { <Confetti burst=burst /> })}
        </div>
    }
}
