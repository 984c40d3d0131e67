//! Vote Data Model
//!
//! Wire types for the vote API and the locally persisted vote record.
//!
//! Chapter payloads are normalised while they are deserialised, so the rest
//! of the crate never sees a missing name, a null vote count or an empty
//! image reference.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fallback display name for chapters the API sends without one
pub const DEFAULT_CHAPTER_NAME: &str = "Equipo";

/// Fallback image for chapters the API sends without one
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/140";

/// Identifier of a chapter (the thing a pack of foods stands for).
///
/// The API is not strict about id types, so both JSON numbers and strings
/// are accepted. Two ids are equal only if their JSON values are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterId::Number(n) => write!(f, "{}", n),
            ChapterId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ChapterId {
    fn from(value: i64) -> Self {
        ChapterId::Number(value)
    }
}

impl From<&str> for ChapterId {
    fn from(value: &str) -> Self {
        ChapterId::Text(value.to_string())
    }
}

impl From<String> for ChapterId {
    fn from(value: String) -> Self {
        ChapterId::Text(value)
    }
}

/// A candidate in the results chart, as returned by `GET /totalVotes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawChapter", rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    pub votes: u64,
    pub image_url: String,
}

impl Chapter {
    pub fn new(id: impl Into<ChapterId>, name: impl Into<String>, votes: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            votes,
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChapter {
    id: ChapterId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    votes: Option<serde_json::Value>,
    #[serde(default)]
    image_url: Option<String>,
}

impl From<RawChapter> for Chapter {
    fn from(raw: RawChapter) -> Self {
        Self {
            id: raw.id,
            name: raw
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_CHAPTER_NAME.to_string()),
            votes: raw.votes.as_ref().map(vote_count).unwrap_or(0),
            image_url: raw
                .image_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
        }
    }
}

/// Coerce a loosely typed vote count into a non-negative integer
fn vote_count(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 }))
            .unwrap_or(0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| f as u64)
            .unwrap_or(0),
        _ => 0,
    }
}

/// A single food inside a pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: String,
}

/// A votable pack, as returned by `GET /food`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPack {
    pub id: ChapterId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub foods: Vec<Food>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Food>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Food>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The locally persisted record of this client's vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub chapter_id: ChapterId,
    /// Epoch milliseconds at which the vote was accepted
    pub ts: i64,
}

impl VoteRecord {
    pub fn now(chapter_id: ChapterId) -> Self {
        Self {
            chapter_id,
            ts: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Body of `POST /vote`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub chapter_id: ChapterId,
}

/// Display label for the pack at `index` (zero-based): "Pack 1", "Pack 2", ...
pub fn pack_label(index: usize) -> String {
    format!("Pack {}", index + 1)
}
