//! User-authored content records: drafts, scheduled posts, AI output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Pending,
    Published,
}

/// A post the user queued for a future publish time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    pub id: String,
    pub user_id: String,
    pub platform: Platform,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub status: PostStatus,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Content produced by the external generation capability and saved by
/// the user. Stored as a draft until scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub id: String,
    pub user_id: String,
    pub platform: Platform,
    pub topic: String,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

/// A not-yet-published piece of content handed to the engagement
/// predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPost {
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub platform: Platform,
    pub posting_time: DateTime<Utc>,
}
