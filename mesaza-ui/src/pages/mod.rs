//! Pages
//!
//! Top-level page components for each route.

pub mod results;
pub mod vote;

pub use results::ResultsPage;
pub use vote::VotePage;
