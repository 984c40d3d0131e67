//! Vote API Client
//!
//! HTTP client for the vote service, used by the CLI.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{endpoint, VoteApi, FOODS_PATH, TOTALS_PATH, VOTE_PATH};
use crate::error::{VoteError, VoteResult};
use crate::model::{Chapter, FoodPack, VoteRequest};

/// reqwest-backed [`VoteApi`]
///
/// No request timeout is configured: a call waits until the service answers.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> VoteResult<Self> {
        let mut headers = HeaderMap::new();
        // totals change constantly, never serve them from a cache
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("mesaza/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VoteError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> VoteResult<T> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-success response into [`VoteError::Api`]
async fn check_status(response: Response) -> VoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "vote API returned an error");
    Err(VoteError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait(?Send)]
impl VoteApi for ApiClient {
    async fn fetch_totals(&self) -> VoteResult<Vec<Chapter>> {
        self.get_json(TOTALS_PATH).await
    }

    async fn fetch_foods(&self) -> VoteResult<Vec<FoodPack>> {
        self.get_json(FOODS_PATH).await
    }

    async fn submit_vote(&self, request: &VoteRequest) -> VoteResult<()> {
        let url = endpoint(&self.base_url, VOTE_PATH);
        tracing::debug!(%url, chapter_id = %request.chapter_id, "POST");

        let response = self.client.post(&url).json(request).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
