//! Wire DTOs for the hanzi study REST API.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON payloads. Response types are lenient
//! where the server has been observed to vary (login token field name, bare vs.
//! wrapped dictionary lists) so decoding failures stay reserved for genuinely
//! unexpected bodies.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Server-assigned dictionary identifier.
pub type DictionaryId = i64;

/// Profile of the signed-in user as returned by `/auth/login` and `/auth/me`.
///
/// The server treats the profile as an open record; only `username` is typed
/// and everything else is carried through untouched so a stored profile
/// round-trips byte-for-byte.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Name to show in the navigation bar.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.username.as_deref().filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        match self.extra.get("id") {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(id @ serde_json::Value::Number(_)) => id.to_string(),
            _ => "me".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Who can see a dictionary besides its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
    Shared,
}

impl Visibility {
    pub fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
            Self::Shared => "shared",
        }
    }
}

/// A dictionary the user owns or can read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    pub id: DictionaryId,
    pub name: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub is_owner: bool,
}

/// `GET /dictionaries` payload; accepts `{ "items": [...] }` or a bare array.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DictionaryList {
    Wrapped {
        #[serde(default)]
        items: Vec<Dictionary>,
    },
    Bare(Vec<Dictionary>),
}

impl DictionaryList {
    pub fn into_items(self) -> Vec<Dictionary> {
        match self {
            Self::Wrapped { items } | Self::Bare(items) => items,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDictionary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Partial update; absent fields keep their server-side value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDictionary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Generic `{ "status": "ok" }` acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// One card due for review (or never studied).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    pub hanzi: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyQueue {
    #[serde(default)]
    pub items: Vec<QueueItem>,
}

/// Self-assessed recall grade sent with a review (SM-2 scale 0-5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Forgot,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Forgot, Rating::Hard, Rating::Good, Rating::Easy];

    /// Grade on the server's 0-5 scale; below 3 resets the card.
    pub fn grade(self) -> u8 {
        match self {
            Self::Forgot => 1,
            Self::Hard => 3,
            Self::Good => 4,
            Self::Easy => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Forgot => "Forgot",
            Self::Hard => "Hard",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }

    pub fn is_known(self) -> bool {
        self.grade() >= 3
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub hanzi: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
}

impl ReviewRequest {
    pub fn new(hanzi: impl Into<String>, rating: Rating) -> Self {
        Self {
            hanzi: hanzi.into(),
            rating: rating.grade(),
            reviewed_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub next_review_at: String,
    pub interval: i64,
    pub ease_factor: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStart {
    pub session_id: i64,
    pub started_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEndRequest {
    pub session_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEnd {
    pub session_id: i64,
    pub ended_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub items: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: u32,
    pub skipped: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonWord {
    pub word: String,
    #[serde(default)]
    pub frequency: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub hanzi: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub common_words: Vec<CommonWord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: u64,
    pub known: u64,
    pub unknown: u64,
    pub due_today: u64,
    /// Accumulated study time in seconds across ended sessions.
    pub study_time_total: u64,
}
