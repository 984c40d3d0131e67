//! HTTP API Client
//!
//! [`VoteApi`] on top of `gloo-net`, talking to the vote service.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::RequestCache;

use mesaza::api::{endpoint, VoteApi, DEFAULT_API_BASE, FOODS_PATH, TOTALS_PATH, VOTE_PATH};
use mesaza::{Chapter, FoodPack, VoteError, VoteRequest, VoteResult};

/// localStorage key that overrides the API base URL
pub const API_URL_KEY: &str = "mesaza_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());
    normalize_base(stored.as_deref())
}

fn normalize_base(stored: Option<&str>) -> String {
    let url = match stored.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_API_BASE,
    };
    url.trim_end_matches('/').to_string()
}

fn map_error(err: gloo_net::Error) -> VoteError {
    match err {
        gloo_net::Error::SerdeError(e) => VoteError::Parse(e.to_string()),
        other => VoteError::Network(other.to_string()),
    }
}

/// Turn a non-success response into [`VoteError::Api`]
async fn check_status(response: Response) -> VoteResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    Err(VoteError::Api { status, message })
}

/// Vote service client for the browser
#[derive(Debug, Clone)]
pub struct GlooApi {
    base_url: String,
}

impl GlooApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(Some(&base_url.into())),
        }
    }

    /// Client for the configured (or default) base URL
    pub fn from_storage() -> Self {
        Self {
            base_url: get_api_base(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> VoteResult<T> {
        // totals change constantly, bypass the HTTP cache entirely
        let response = Request::get(&endpoint(&self.base_url, path))
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(map_error)?;

        check_status(response).await?.json().await.map_err(map_error)
    }
}

#[async_trait(?Send)]
impl VoteApi for GlooApi {
    async fn fetch_totals(&self) -> VoteResult<Vec<Chapter>> {
        self.get_json(TOTALS_PATH).await
    }

    async fn fetch_foods(&self) -> VoteResult<Vec<FoodPack>> {
        self.get_json(FOODS_PATH).await
    }

    async fn submit_vote(&self, request: &VoteRequest) -> VoteResult<()> {
        let response = Request::post(&endpoint(&self.base_url, VOTE_PATH))
            .json(request)
            .map_err(map_error)?
            .send()
            .await
            .map_err(map_error)?;

        check_status(response).await?;
        Ok(())
    }
}
