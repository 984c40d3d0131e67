//! Local vote persistence
//!
//! A tiny string key-value seam. The browser keeps the vote in
//! `localStorage`; the CLI keeps it in a JSON file under the data dir.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::VoteResult;

/// Key under which the vote record is stored
pub const VOTE_KEY: &str = "voted:global";

/// String key-value store holding the local vote record
pub trait VoteStore {
    fn get(&self, key: &str) -> VoteResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> VoteResult<()>;
}

impl<S: VoteStore + ?Sized> VoteStore for &S {
    fn get(&self, key: &str) -> VoteResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> VoteResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store, for tests and previews
#[derive(Debug, Default)]
pub struct MemoryVoteStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VoteStore for MemoryVoteStore {
    fn get(&self, key: &str) -> VoteResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> VoteResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileVoteStore;

#[cfg(feature = "native")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use super::VoteStore;
    use crate::error::VoteResult;

    /// File name of the store inside the data dir
    pub const STORE_FILE: &str = "store.json";

    /// JSON object on disk, one string value per key
    #[derive(Debug, Clone)]
    pub struct FileVoteStore {
        path: PathBuf,
    }

    impl FileVoteStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Store at `<data_dir>/store.json`
        pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
            Self::new(data_dir.as_ref().join(STORE_FILE))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> VoteResult<BTreeMap<String, String>> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }
    }

    impl VoteStore for FileVoteStore {
        fn get(&self, key: &str) -> VoteResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> VoteResult<()> {
            let mut entries = self.read_all().unwrap_or_else(|e| {
                tracing::warn!(path = ?self.path, error = %e, "Discarding unreadable store");
                BTreeMap::new()
            });
            entries.insert(key.to_string(), value.to_string());

            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // write-then-rename so a crash never leaves half a file
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }
}
