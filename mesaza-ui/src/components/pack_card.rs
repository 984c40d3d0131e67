//! Pack Card Component
//!
//! One votable pack: badge, food grid and the vote button.

use leptos::*;

use mesaza::ballot::PackStatus;
use mesaza::{pack_label, ChapterId, ConfettiBurst, FoodPack};

use crate::components::Confetti;

/// Class list of a pack card in the given state
pub fn pack_class(status: PackStatus) -> String {
    match status.css_class() {
        Some(extra) => format!("pack {}", extra),
        None => "pack".to_string(),
    }
}

/// Pack card component
#[component]
pub fn PackCard(
    /// Zero-based position on the ballot
    index: usize,
    pack: FoodPack,
    #[prop(into)]
    status: Signal<PackStatus>,
    /// A submission is pending
    #[prop(into)]
    busy: Signal<bool>,
    #[prop(into)]
    celebration: Signal<Option<ConfettiBurst>>,
    #[prop(into)]
    on_vote: Callback<(usize, ChapterId)>,
) -> impl IntoView {
    let id = pack.id;

    view! {
        <div class=move || pack_class(status.get())>
            <div class="pack-badge">{pack_label(index)}</div>
            <div class="border-anim" />

            <div class="foods">
                {pack.foods.into_iter().map(|food| {
                    let alt = food.name.clone();
                    view! {
                        <div class="food">
                            <div class="img">
                                <img
                                    src=food.image_url
                                    alt=alt
                                    loading="lazy"
                                    decoding="async"
                                    referrerpolicy="no-referrer"
                                />
                            </div>
                            <p>{food.name}</p>
                        </div>
                    }
                }).collect_view()}
            </div>

            <button
                class="btn"
                type="button"
                disabled=move || busy.get() || !status.get().can_vote()
                on:click=move |_| on_vote.call((index, id.clone()))
            >
                {move || status.get().button_text()}
            </button>

            {move || celebration.get().map(|burst| view! { <Confetti burst=burst /> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_class() {
        assert_eq!(pack_class(PackStatus::Open), "pack");
        assert_eq!(pack_class(PackStatus::Chosen), "pack voted");
        assert_eq!(pack_class(PackStatus::Locked), "pack locked");
    }
}
