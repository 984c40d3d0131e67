//! Loading Component
//!
//! Skeleton placeholders shown while the API answers.

use leptos::*;

/// Skeleton cards for the pack grid
#[component]
pub fn PackSkeletons(
    #[prop(default = 3)]
    count: usize,
) -> impl IntoView {
    view! {
        {(0..count).map(|_| view! {
            <div class="skeleton pack-skel" aria-hidden="true" />
        }).collect_view()}
    }
}

/// Skeleton bars for the results chart
#[component]
pub fn BarSkeletons(
    #[prop(default = 6)]
    count: usize,
) -> impl IntoView {
    view! {
        {(0..count).map(|_| view! {
            <div class="bar-wrapper" aria-hidden="true">
                <div class="skeleton bar-skel" />
            </div>
        }).collect_view()}
    }
}
