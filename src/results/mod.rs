//! Results
//!
//! Everything behind the results screen: the tally of a vote snapshot,
//! the suspense/reveal sequencer and the winner celebration.

pub mod confetti;
pub mod reveal;
pub mod tally;

pub use confetti::{ConfettiBurst, ConfettiPiece, ConfettiStyle};
pub use reveal::{
    countdown_secs, hidden_aria_label, progress, Clock, RevealConfig, RevealPhase,
    RevealSequencer, SuspenseFrame, FINAL_STATUS, HIDDEN_LABEL, SUSPENSE_STATUS,
};
pub use tally::{winner_index, Standing, Tally, MIN_BAR_PX};

#[cfg(feature = "native")]
pub use reveal::TokioClock;
