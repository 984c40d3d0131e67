//! Vote Page
//!
//! Lists the packs and lets this browser cast its single vote.

use leptos::*;

use mesaza::ballot::{PackStatus, VOTED_BUTTON_TEXT};
use mesaza::error::{PACKS_LOAD_FAILED, PACKS_RETRY_HINT};
use mesaza::{
    confirm_prompt, ChapterId, ConfettiBurst, ConfettiStyle, FoodPack, VoteApi, VoteError,
};

use crate::components::{celebrate, PackCard, PackSkeletons};
use crate::state::global::GlobalState;

#[derive(Clone)]
enum PacksState {
    Loading,
    Failed,
    Ready(Vec<FoodPack>),
}

/// Vote page component
#[component]
pub fn VotePage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let packs = create_rw_signal(PacksState::Loading);
    let busy = create_rw_signal(false);
    let celebration = create_rw_signal::<Option<(ChapterId, ConfettiBurst)>>(None);

    // Fetch packs on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let api = state_for_effect.api.clone();
        spawn_local(async move {
            match api.fetch_foods().await {
                Ok(list) => packs.set(PacksState::Ready(list)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch packs: {}", e).into());
                    packs.set(PacksState::Failed);
                }
            }
        });
    });

    let state_for_vote = state.clone();
    let on_vote = Callback::new(move |(index, id): (usize, ChapterId)| {
        let state = state_for_vote.clone();

        // Already voted, possibly from another tab
        if state.ballot.has_voted() {
            state.refresh_saved_vote();
            return;
        }

        let confirmed = window()
            .confirm_with_message(&confirm_prompt(index))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        busy.set(true);
        spawn_local(async move {
            match state.ballot.cast(&*state.api, &id).await {
                Ok(record) => {
                    state.saved_vote.set(Some(record));
                    let burst = ConfettiBurst::generate(ConfettiStyle::Vote, &mut rand::thread_rng());
                    let cleanup_ms = burst.cleanup_ms();
                    celebrate(celebration, (id, burst), cleanup_ms);
                    state.show_success(VOTED_BUTTON_TEXT);
                }
                Err(e @ (VoteError::AlreadyVoted(_) | VoteError::InFlight)) => {
                    state.refresh_saved_vote();
                    state.show_error(e.user_message());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Vote failed: {}", e).into());
                    let _ = window().alert_with_message(e.user_message());
                }
            }
            busy.set(false);
        });
    });

    let saved_vote = state.saved_vote;

    view! {
        <section>
            <h1>"Elegí tu pack favorito"</h1>

            <div class="packs">
                {move || match packs.get() {
                    PacksState::Loading => view! { <PackSkeletons count=3 /> }.into_view(),
                    PacksState::Failed => view! { <ErrorCard /> }.into_view(),
                    PacksState::Ready(list) => list
                        .into_iter()
                        .enumerate()
                        .map(|(index, pack)| {
                            let id = pack.id.clone();
                            let id_for_status = id.clone();
                            let status = Signal::derive(move || {
                                PackStatus::for_saved(saved_vote.get().as_ref(), &id_for_status)
                            });
                            let burst = Signal::derive(move || {
                                celebration
                                    .get()
                                    .filter(|(chosen, _)| chosen == &id)
                                    .map(|(_, burst)| burst)
                            });

                            view! {
                                <PackCard
                                    index=index
                                    pack=pack
                                    status=status
                                    busy=busy
                                    celebration=burst
                                    on_vote=on_vote
                                />
                            }
                        })
                        .collect_view(),
                }}
            </div>
        </section>
    }
}

/// Shown when the packs could not be loaded
#[component]
fn ErrorCard() -> impl IntoView {
    view! {
        <div class="pack">
            <div class="border-anim" />
            <div style="text-align:left">
                <div style="font-weight:700">{PACKS_LOAD_FAILED}</div>
                <div style="color:#6b7280">{PACKS_RETRY_HINT}</div>
            </div>
            <button class="btn" on:click=move |_| { let _ = window().location().reload(); }>
                "Reintentar"
            </button>
        </div>
    }
}
