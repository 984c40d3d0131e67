//! Results Page
//!
//! Runs the suspense countdown over the live totals, then reveals the final
//! chart and the winner.

use leptos::*;
use rand::{rngs::StdRng, SeedableRng};

use mesaza::error::RESULTS_LOAD_FAILED;
use mesaza::results::{hidden_aria_label, FINAL_STATUS, HIDDEN_LABEL, SUSPENSE_STATUS};
use mesaza::{
    Chapter, ConfettiBurst, ConfettiStyle, RevealConfig, RevealSequencer, SuspenseFrame, Tally,
    VoteApi,
};

use crate::components::{celebrate, BarSkeletons, ResultBar, WinnerBanner};
use crate::state::{BrowserClock, GlobalState};

#[derive(Clone, Copy, PartialEq)]
enum LoadState {
    Loading,
    Failed,
    Ready,
}

/// Inline style of the countdown progress bar
fn progress_style(frame: Option<&SuspenseFrame>) -> String {
    let pct = frame.map(SuspenseFrame::progress_pct).unwrap_or(0.0);
    format!("width:{:.1}%", pct)
}

/// Which bars are already at their final height when the reveal starts.
///
/// Those get no `transitionend`, so their labels show right away.
fn settled_on_reveal(current: &[u32], tally: &Tally) -> Vec<bool> {
    tally
        .standings
        .iter()
        .enumerate()
        .map(|(i, s)| current.get(i) == Some(&s.bar_height_px))
        .collect()
}

/// Results page component
#[component]
pub fn ResultsPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let load = create_rw_signal(LoadState::Loading);
    let chapters = create_rw_signal(Vec::<Chapter>::new());
    let heights = create_rw_signal(Vec::<u32>::new());
    let frame = create_rw_signal::<Option<SuspenseFrame>>(None);
    let tally = create_rw_signal::<Option<Tally>>(None);
    let settled = create_rw_signal(Vec::<bool>::new());
    let confetti = create_rw_signal::<Option<ConfettiBurst>>(None);

    // Fetch totals and drive the reveal on mount
    create_effect(move |_| {
        let api = state.api.clone();
        spawn_local(async move {
            let data = match api.fetch_totals().await {
                Ok(data) => data,
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch results: {}", e).into());
                    load.set(LoadState::Failed);
                    return;
                }
            };

            let mut sequencer =
                RevealSequencer::new(data, RevealConfig::default(), StdRng::from_entropy());
            heights.set(sequencer.heights().to_vec());
            settled.set(vec![false; sequencer.chapters().len()]);
            chapters.set(sequencer.chapters().to_vec());
            load.set(LoadState::Ready);

            let result = sequencer
                .run(&BrowserClock, |f| {
                    heights.set(f.heights.clone());
                    frame.set(Some(f.clone()));
                })
                .await;

            settled.set(settled_on_reveal(&heights.get_untracked(), &result));
            heights.set(sequencer.heights().to_vec());
            tally.set(Some(result));

            if sequencer.take_celebration() {
                let burst = ConfettiBurst::generate(ConfettiStyle::Winner, &mut rand::thread_rng());
                let cleanup_ms = burst.cleanup_ms();
                celebrate(confetti, burst, cleanup_ms);
            }
        });
    });

    let revealed = move || tally.with(Option::is_some);

    view! {
        <section>
            <h1>"Resultados"</h1>

            <div class="status">
                <span>
                    {move || match load.get() {
                        LoadState::Ready if revealed() => FINAL_STATUS,
                        LoadState::Ready => SUSPENSE_STATUS,
                        _ => "",
                    }}
                </span>
                <div class="progress">
                    <div class="progress-bar" style=move || frame.with(|f| progress_style(f.as_ref())) />
                </div>
                <span>{move || frame.with(|f| f.as_ref().map(SuspenseFrame::countdown_text))}</span>
            </div>

            <div class="chart" aria-busy=move || (!revealed()).to_string()>
                {move || match load.get() {
                    LoadState::Loading => view! { <BarSkeletons count=6 /> }.into_view(),
                    LoadState::Failed => view! {
                        <p style="padding:16px">{RESULTS_LOAD_FAILED}</p>
                    }.into_view(),
                    LoadState::Ready => chapters
                        .get_untracked()
                        .into_iter()
                        .enumerate()
                        .map(|(i, chapter)| {
                            let name = chapter.name.clone();
                            let height = Signal::derive(move || {
                                heights.with(|h| h.get(i).copied().unwrap_or(0))
                            });
                            let is_settled = move || settled.with(|s| s.get(i).copied().unwrap_or(false));
                            let label = Signal::derive(move || {
                                let shown = is_settled();
                                tally.with(|t| match t.as_ref().and_then(|t| t.standings.get(i)) {
                                    Some(standing) if shown => standing.label(),
                                    _ => HIDDEN_LABEL.to_string(),
                                })
                            });
                            let aria_label = Signal::derive(move || {
                                let shown = is_settled();
                                tally.with(|t| match t.as_ref().and_then(|t| t.standings.get(i)) {
                                    Some(standing) if shown => standing.aria_label(),
                                    _ => hidden_aria_label(&name),
                                })
                            });
                            let winner = Signal::derive(move || {
                                tally.with(|t| t.as_ref().map_or(false, |t| t.is_winner(i)))
                            });
                            let bar_confetti = Signal::derive(move || {
                                if winner.get() { confetti.get() } else { None }
                            });
                            let on_settled = Callback::new(move |_: ()| {
                                if revealed() {
                                    settled.update(|s| {
                                        if let Some(done) = s.get_mut(i) {
                                            *done = true;
                                        }
                                    });
                                }
                            });

                            view! {
                                <ResultBar
                                    chapter=chapter
                                    height=height
                                    label=label
                                    aria_label=aria_label
                                    winner=winner
                                    confetti=bar_confetti
                                    on_settled=on_settled
                                />
                            }
                        })
                        .collect_view(),
                }}
            </div>

            {move || {
                tally.with(|t| t.as_ref().and_then(Tally::winner).cloned())
                    .map(|winner| view! { <WinnerBanner winner=winner /> })
            }}
        </section>
    }
}
