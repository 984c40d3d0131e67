//! UI Components
//!
//! Reusable Leptos components for the vote and results pages.

pub mod bar;
pub mod confetti;
pub mod loading;
pub mod pack_card;
pub mod toast;
pub mod winner_banner;

pub use bar::ResultBar;
pub use confetti::{celebrate, Confetti};
pub use loading::{BarSkeletons, PackSkeletons};
pub use pack_card::PackCard;
pub use toast::Toast;
pub use winner_banner::WinnerBanner;
