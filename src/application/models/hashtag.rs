use crate::constants::HASHTAG_MARKER;
use serde::{Deserialize, Serialize};

/// A hashtag as the server reports it. Names are unique server-side.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Hashtag {
    pub id: u64,
    pub name: String,
}

/// Creation payload for `POST /hashtags/`.
#[derive(Debug, Serialize)]
pub struct NewHashtag {
    pub name: String,
}

/// Normalizes a user-typed hashtag name before submission: surrounding
/// whitespace is trimmed and one leading `#` is stripped. Casing and inner
/// characters are left to the server.
pub fn normalize_hashtag_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(HASHTAG_MARKER)
        .unwrap_or(trimmed)
        .to_string()
}
