//! # Mesaza
//!
//! Single-vote pack ballot with an animated results reveal.
//!
//! ## Features
//!
//! - **One vote per client**: the accepted vote is persisted locally and every
//!   other pack is locked
//! - **Suspense reveal**: bars jitter through a countdown before the real
//!   tally settles and the winner is announced
//! - **Shared core**: the same tally, sequencer and ballot logic runs in the
//!   CLI and in the browser widget
//!
//! ## Modules
//!
//! - [`model`]: Wire and domain types
//! - [`results`]: Tally, reveal sequencer and confetti
//! - [`ballot`]: Vote submission and local vote record
//! - [`api`]: Vote service seam and the native HTTP client
//! - [`config`]: TOML configuration (native only)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mesaza::{ApiClient, Ballot, ChapterId, FileVoteStore, VoteApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new(mesaza::api::DEFAULT_API_BASE)?;
//!     let ballot = Ballot::new(FileVoteStore::in_dir("./mesaza_data"));
//!
//!     let packs = api.fetch_foods().await?;
//!     println!("{} packs on the ballot", packs.len());
//!
//!     let record = ballot.cast(&api, &ChapterId::Number(1)).await?;
//!     println!("Voted for {} at {}", record.chapter_id, record.ts);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod ballot;
pub mod error;
pub mod model;
pub mod results;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod render;

// Re-export top-level types for convenience
pub use model::{pack_label, Chapter, ChapterId, Food, FoodPack, VoteRecord, VoteRequest};

pub use error::{VoteError, VoteResult};

pub use results::{
    Clock, ConfettiBurst, ConfettiPiece, ConfettiStyle, RevealConfig, RevealPhase,
    RevealSequencer, Standing, SuspenseFrame, Tally,
};

pub use ballot::{confirm_prompt, Ballot, MemoryVoteStore, PackStatus, VoteStore, VOTE_KEY};

pub use api::VoteApi;

#[cfg(feature = "native")]
pub use api::ApiClient;

#[cfg(feature = "native")]
pub use ballot::FileVoteStore;

#[cfg(feature = "native")]
pub use results::TokioClock;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
