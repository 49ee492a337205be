use crate::application::models::hashtag::Hashtag;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A stored photo as the server reports it. The client never mutates this
/// shape; it only requests, displays, or deletes it.
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub id: u64,
    /// Publicly resolvable URL of the image itself.
    pub public_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

/// Payload for a photo upload: the raw file plus the comma-separated hashtag
/// text exactly as the user typed it (possibly empty). The server owns the
/// splitting and tag creation.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub hashtags: String,
}

impl PhotoUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
        hashtags: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
            hashtags: hashtags.into(),
        }
    }
}

/// Server confirmation of a deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub detail: Option<String>,
}
