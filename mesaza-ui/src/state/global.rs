//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use std::rc::Rc;

use mesaza::{Ballot, VoteRecord};

use crate::api::GlooApi;
use crate::state::storage::LocalStorageVoteStore;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Vote service client
    pub api: Rc<GlooApi>,
    /// Single-vote guard backed by localStorage
    pub ballot: Rc<Ballot<LocalStorageVoteStore>>,
    /// The vote on record for this browser
    pub saved_vote: RwSignal<Option<VoteRecord>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let ballot = Ballot::new(LocalStorageVoteStore);
    let saved = ballot.saved_vote();

    let state = GlobalState {
        api: Rc::new(GlooApi::from_storage()),
        ballot: Rc::new(ballot),
        saved_vote: create_rw_signal(saved),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Re-read the vote record from storage
    pub fn refresh_saved_vote(&self) {
        self.saved_vote.set(self.ballot.saved_vote());
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}
