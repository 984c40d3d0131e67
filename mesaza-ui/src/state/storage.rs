//! `localStorage`-backed vote store

use mesaza::{VoteError, VoteResult, VoteStore};
use web_sys::Storage;

/// Keeps the vote record in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageVoteStore;

impl LocalStorageVoteStore {
    fn storage() -> VoteResult<Storage> {
        let window =
            web_sys::window().ok_or_else(|| VoteError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| VoteError::Storage("localStorage unavailable".to_string()))
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> VoteError {
    VoteError::Storage(format!("{:?}", err))
}

impl VoteStore for LocalStorageVoteStore {
    fn get(&self, key: &str) -> VoteResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> VoteResult<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }
}
