//! Winner Banner Component

use leptos::*;

use mesaza::Standing;

/// Panel announcing the winner under the chart
#[component]
pub fn WinnerBanner(winner: Standing) -> impl IntoView {
    let pct = winner.percentage_text();
    let alt = winner.name.clone();

    view! {
        <section class="winner-banner" aria-live="polite">
            <img src=winner.image_url alt=alt />
            <div>
                <div style="font-weight:700">"🏆 " {winner.name}</div>
                <div>
                    "Votos: " <span>{winner.votes}</span>
                    " · " <span>{pct}</span>
                </div>
            </div>
        </section>
    }
}
