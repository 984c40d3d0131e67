//! Vote error types
//!
//! Every failure the widget can hit ends up as one of these. At the surface
//! they all collapse into a short message for the user.

use thiserror::Error;

use crate::model::ChapterId;

/// Shown when the packs cannot be loaded
pub const PACKS_LOAD_FAILED: &str = "No pudimos cargar los packs";

/// Hint shown under [`PACKS_LOAD_FAILED`]
pub const PACKS_RETRY_HINT: &str = "Reintentá en unos segundos";

/// Shown when the results cannot be loaded
pub const RESULTS_LOAD_FAILED: &str = "No pudimos cargar los resultados. Reintentá más tarde.";

/// Shown when a vote submission fails
pub const VOTE_FAILED: &str = "No pudimos registrar el voto. Probá de nuevo.";

/// Errors that can occur while loading data or casting a vote
#[derive(Error, Debug)]
pub enum VoteError {
    /// This client already has a vote on record
    #[error("Already voted for chapter {0}")]
    AlreadyVoted(ChapterId),

    /// A submission is still waiting for the API
    #[error("A vote submission is already in progress")]
    InFlight,

    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The local vote store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VoteError {
    /// The message to show the user for a failed vote
    pub fn user_message(&self) -> &'static str {
        match self {
            VoteError::AlreadyVoted(_) => "Ya registraste tu voto.",
            VoteError::InFlight => "Tu voto se está enviando.",
            _ => VOTE_FAILED,
        }
    }
}

impl From<serde_json::Error> for VoteError {
    fn from(err: serde_json::Error) -> Self {
        VoteError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for VoteError {
    fn from(err: std::io::Error) -> Self {
        VoteError::Storage(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for VoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            VoteError::Parse(err.to_string())
        } else {
            VoteError::Network(err.to_string())
        }
    }
}

/// Result type alias for vote operations
pub type VoteResult<T> = Result<T, VoteError>;
