//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::Toast;
use crate::pages::{ResultsPage, VotePage};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <nav class="nav">
                <A href="/" exact=true>"Votar"</A>
                <A href="/resultados">"Resultados"</A>
            </nav>

            <main class="container">
                <Routes>
                    <Route path="/" view=VotePage />
                    <Route path="/resultados" view=ResultsPage />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>

            <Toast />
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="container" style="text-align:center">
            <h1>"Página no encontrada"</h1>
            <A href="/" class="btn">"Ir a votar"</A>
        </div>
    }
}
