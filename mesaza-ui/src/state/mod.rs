//! State Management
//!
//! Global application state plus the browser implementations of the core
//! seams (vote storage, clock).

pub mod clock;
pub mod global;
pub mod storage;

pub use clock::BrowserClock;
pub use global::{provide_global_state, GlobalState};
pub use storage::LocalStorageVoteStore;
