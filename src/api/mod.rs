//! Vote API
//!
//! The remote service is opaque; this module only fixes its three endpoints
//! and the trait both clients implement.
//!
//! # Endpoints
//!
//! - `GET /totalVotes` - Vote totals per chapter
//! - `GET /food` - Votable packs and their foods
//! - `POST /vote` - Cast a vote, body `{"chapterId": ...}`
//!
//! The native client lives in [`client`] (reqwest). The browser build
//! provides its own implementation on top of `gloo-net`.

#[cfg(feature = "native")]
pub mod client;

#[cfg(feature = "native")]
pub use client::ApiClient;

use async_trait::async_trait;

use crate::error::VoteResult;
use crate::model::{Chapter, FoodPack, VoteRequest};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://votacion-mesaza-back.vercel.app";

pub const TOTALS_PATH: &str = "/totalVotes";
pub const FOODS_PATH: &str = "/food";
pub const VOTE_PATH: &str = "/vote";

/// Operations the widget needs from the vote service.
///
/// Futures are not required to be `Send`; both flows run on a single
/// cooperative thread and the browser client cannot be `Send` at all.
#[async_trait(?Send)]
pub trait VoteApi {
    /// Fetch the current vote totals
    async fn fetch_totals(&self) -> VoteResult<Vec<Chapter>>;

    /// Fetch the votable packs
    async fn fetch_foods(&self) -> VoteResult<Vec<FoodPack>>;

    /// Submit a vote. Any non-success status is an error.
    async fn submit_vote(&self, request: &VoteRequest) -> VoteResult<()>;
}

/// Join a base URL and an endpoint path
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        assert_eq!(
            endpoint("https://api.example/", TOTALS_PATH),
            "https://api.example/totalVotes"
        );
        assert_eq!(endpoint("http://localhost:3000", VOTE_PATH), "http://localhost:3000/vote");
    }
}
