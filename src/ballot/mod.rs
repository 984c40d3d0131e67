//! Ballot
//!
//! The single-vote guard. A client gets exactly one accepted vote: the
//! ballot reads the persisted record before every submission and only
//! writes it after the API has accepted the vote.
//!
//! There is no lock. The widget is the only writer of its own record, so a
//! read-before-write check plus an in-flight flag is enough.

pub mod store;

pub use store::{MemoryVoteStore, VoteStore, VOTE_KEY};

#[cfg(feature = "native")]
pub use store::FileVoteStore;

use std::cell::Cell;

use crate::api::VoteApi;
use crate::error::{VoteError, VoteResult};
use crate::model::{pack_label, ChapterId, VoteRecord, VoteRequest};

/// Button text while a pack can still be voted
pub const VOTE_BUTTON_TEXT: &str = "Votar este pack";

/// Button text on the pack that received this client's vote
pub const VOTED_BUTTON_TEXT: &str = "Voto registrado";

/// How a pack should be presented given the local vote state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackStatus {
    /// No vote yet, the pack can be chosen
    Open,
    /// This client voted for the pack
    Chosen,
    /// This client voted for another pack
    Locked,
}

impl PackStatus {
    pub fn for_saved(saved: Option<&VoteRecord>, id: &ChapterId) -> Self {
        match saved {
            None => PackStatus::Open,
            Some(record) if &record.chapter_id == id => PackStatus::Chosen,
            Some(_) => PackStatus::Locked,
        }
    }

    pub fn can_vote(self) -> bool {
        self == PackStatus::Open
    }

    pub fn button_text(self) -> &'static str {
        match self {
            PackStatus::Chosen => VOTED_BUTTON_TEXT,
            PackStatus::Open | PackStatus::Locked => VOTE_BUTTON_TEXT,
        }
    }

    /// Extra class on the pack card
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            PackStatus::Open => None,
            PackStatus::Chosen => Some("voted"),
            PackStatus::Locked => Some("locked"),
        }
    }
}

/// Confirmation question before casting a vote for the pack at `index`
pub fn confirm_prompt(index: usize) -> String {
    format!("¿Confirmás tu voto para el {}?", pack_label(index))
}

/// Clears the in-flight flag however the submission ends
struct InFlightGuard<'a>(&'a Cell<bool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Guards and records this client's single vote
pub struct Ballot<S> {
    store: S,
    in_flight: Cell<bool>,
}

impl<S: VoteStore> Ballot<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            in_flight: Cell::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The persisted vote, if any.
    ///
    /// A record that cannot be read or parsed counts as no vote.
    pub fn saved_vote(&self) -> Option<VoteRecord> {
        let raw = match self.store.get(VOTE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved vote");
                return None;
            }
        };

        match serde_json::from_str::<Option<VoteRecord>>(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt saved vote");
                None
            }
        }
    }

    pub fn has_voted(&self) -> bool {
        self.saved_vote().is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub fn status_of(&self, id: &ChapterId) -> PackStatus {
        PackStatus::for_saved(self.saved_vote().as_ref(), id)
    }

    /// Submit a vote for `chapter_id` and persist it once accepted.
    ///
    /// Fails with [`VoteError::AlreadyVoted`] if a vote is on record and
    /// with [`VoteError::InFlight`] while another submission is pending.
    /// A failed submission leaves no record behind.
    pub async fn cast<A>(&self, api: &A, chapter_id: &ChapterId) -> VoteResult<VoteRecord>
    where
        A: VoteApi + ?Sized,
    {
        if let Some(saved) = self.saved_vote() {
            return Err(VoteError::AlreadyVoted(saved.chapter_id));
        }
        if self.in_flight.replace(true) {
            return Err(VoteError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let request = VoteRequest {
            chapter_id: chapter_id.clone(),
        };
        if let Err(e) = api.submit_vote(&request).await {
            tracing::warn!(chapter_id = %chapter_id, error = %e, "Vote submission failed");
            return Err(e);
        }

        let record = VoteRecord::now(chapter_id.clone());
        self.store
            .set(VOTE_KEY, &serde_json::to_string(&record)?)
            .map_err(|e| {
                tracing::error!(error = %e, "Vote accepted but could not be saved locally");
                e
            })?;

        tracing::info!(chapter_id = %chapter_id, ts = record.ts, "Vote recorded");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, FoodPack};
    use async_trait::async_trait;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeApi {
        fail: Cell<bool>,
        submitted: RefCell<Vec<ChapterId>>,
    }

    #[async_trait(?Send)]
    impl VoteApi for FakeApi {
        async fn fetch_totals(&self) -> VoteResult<Vec<Chapter>> {
            Ok(Vec::new())
        }

        async fn fetch_foods(&self) -> VoteResult<Vec<FoodPack>> {
            Ok(Vec::new())
        }

        async fn submit_vote(&self, request: &VoteRequest) -> VoteResult<()> {
            if self.fail.get() {
                return Err(VoteError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            self.submitted.borrow_mut().push(request.chapter_id.clone());
            Ok(())
        }
    }

    fn id(n: i64) -> ChapterId {
        ChapterId::Number(n)
    }

    #[tokio::test]
    async fn test_only_one_successful_vote() {
        let ballot = Ballot::new(MemoryVoteStore::new());
        let api = FakeApi::default();

        let record = ballot.cast(&api, &id(2)).await.unwrap();
        assert_eq!(record.chapter_id, id(2));
        assert!(ballot.has_voted());

        let err = ballot.cast(&api, &id(3)).await.unwrap_err();
        assert!(matches!(err, VoteError::AlreadyVoted(ChapterId::Number(2))));

        let err = ballot.cast(&api, &id(2)).await.unwrap_err();
        assert!(matches!(err, VoteError::AlreadyVoted(_)));

        assert_eq!(api.submitted.borrow().as_slice(), &[id(2)]);
    }

    #[tokio::test]
    async fn test_failed_submission_leaves_no_record() {
        let ballot = Ballot::new(MemoryVoteStore::new());
        let api = FakeApi::default();
        api.fail.set(true);

        let err = ballot.cast(&api, &id(1)).await.unwrap_err();
        assert_eq!(err.user_message(), crate::error::VOTE_FAILED);
        assert!(!ballot.has_voted());
        assert!(!ballot.is_in_flight());

        // the control is usable again
        api.fail.set(false);
        ballot.cast(&api, &id(1)).await.unwrap();
        assert!(ballot.has_voted());
    }

    /// Holds every submission until the gate opens
    #[derive(Default)]
    struct GatedApi {
        gate: tokio::sync::Notify,
    }

    #[async_trait(?Send)]
    impl VoteApi for GatedApi {
        async fn fetch_totals(&self) -> VoteResult<Vec<Chapter>> {
            Ok(Vec::new())
        }

        async fn fetch_foods(&self) -> VoteResult<Vec<FoodPack>> {
            Ok(Vec::new())
        }

        async fn submit_vote(&self, _request: &VoteRequest) -> VoteResult<()> {
            self.gate.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_second_click_while_pending_is_rejected() {
        let ballot = Ballot::new(MemoryVoteStore::new());
        let api = GatedApi::default();
        let (a, b) = (id(1), id(2));

        let (first, second, _) = tokio::join!(
            ballot.cast(&api, &a),
            ballot.cast(&api, &b),
            async { api.gate.notify_one() },
        );

        assert_eq!(first.unwrap().chapter_id, id(1));
        assert!(matches!(second, Err(VoteError::InFlight)));
        assert!(!ballot.is_in_flight());
    }

    #[tokio::test]
    async fn test_existing_record_blocks_before_network() {
        let store = MemoryVoteStore::new();
        store.set(VOTE_KEY, r#"{"chapterId":"a","ts":1}"#).unwrap();
        let ballot = Ballot::new(&store);
        let api = FakeApi::default();

        assert!(ballot.cast(&api, &"b".into()).await.is_err());
        assert!(api.submitted.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_record_format() {
        let store = MemoryVoteStore::new();
        let ballot = Ballot::new(&store);
        ballot.cast(&FakeApi::default(), &id(7)).await.unwrap();

        let raw = store.get(VOTE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["chapterId"], 7);
        assert!(value["ts"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_corrupt_record_counts_as_no_vote() {
        let store = MemoryVoteStore::new();
        store.set(VOTE_KEY, "{not json").unwrap();
        let ballot = Ballot::new(&store);
        assert_eq!(ballot.saved_vote(), None);

        store.set(VOTE_KEY, "null").unwrap();
        assert_eq!(ballot.saved_vote(), None);
    }

    #[test]
    fn test_pack_status() {
        let store = MemoryVoteStore::new();
        let ballot = Ballot::new(&store);
        assert_eq!(ballot.status_of(&id(1)), PackStatus::Open);

        store.set(VOTE_KEY, r#"{"chapterId":1,"ts":1}"#).unwrap();
        assert_eq!(ballot.status_of(&id(1)), PackStatus::Chosen);
        assert_eq!(ballot.status_of(&id(2)), PackStatus::Locked);
        // ids compare by JSON value, "1" is not 1
        assert_eq!(ballot.status_of(&"1".into()), PackStatus::Locked);
    }

    #[test]
    fn test_pack_status_presentation() {
        assert!(PackStatus::Open.can_vote());
        assert!(!PackStatus::Locked.can_vote());
        assert_eq!(PackStatus::Chosen.button_text(), "Voto registrado");
        assert_eq!(PackStatus::Locked.button_text(), "Votar este pack");
        assert_eq!(PackStatus::Chosen.css_class(), Some("voted"));
        assert_eq!(PackStatus::Locked.css_class(), Some("locked"));
        assert_eq!(PackStatus::Open.css_class(), None);
    }

    #[test]
    fn test_confirm_prompt() {
        assert_eq!(confirm_prompt(1), "¿Confirmás tu voto para el Pack 2?");
    }
}
