//! The unified analytics record every platform sync writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// A single post in a record's top-posts list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub caption: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Likes, or total reactions for platforms that bundle them.
    pub likes: u64,
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    /// likes + comments (+ shares where the platform reports them).
    pub engagement: u64,
    /// Measured impressions, or an estimate when the API reported none.
    pub impressions: u64,
    /// Set when `impressions` came from the engagement-based fallback
    /// heuristic rather than the platform API.
    #[serde(default)]
    pub impressions_estimated: bool,
    /// engagement / impressions * 100, rounded to 2 decimals.
    pub engagement_rate: f64,
}

/// One analytics document per (user, platform), overwritten wholesale on
/// each sync. Never mutated field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalyticsRecord {
    pub user_id: String,
    pub platform: Platform,
    pub impressions: u64,
    pub engagement: u64,
    /// `None` when the source never reported a follower count; `Some(0)`
    /// when it reported zero. Downstream rules treat these differently.
    #[serde(default)]
    pub followers: Option<u64>,
    pub posts: u64,
    /// Descending by engagement, at most five entries.
    #[serde(default)]
    pub top_posts: Vec<PostSummary>,
    /// Synthetic placeholder data written when the live source was
    /// unavailable. Must stay distinguishable from real measurements.
    #[serde(default)]
    pub is_sample_data: bool,
    pub last_updated: DateTime<Utc>,
}

impl PlatformAnalyticsRecord {
    /// Store key, unique per user and platform.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.user_id, self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PlatformAnalyticsRecord {
        PlatformAnalyticsRecord {
            user_id: "u1".into(),
            platform: Platform::Instagram,
            impressions: 1000,
            engagement: 80,
            followers: Some(500),
            posts: 12,
            top_posts: vec![],
            is_sample_data: false,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn key_is_user_and_platform() {
        assert_eq!(sample_record().key(), "u1_instagram");
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["isSampleData"], false);
        assert!(json["lastUpdated"].is_string());
    }

    #[test]
    fn missing_followers_deserializes_to_none() {
        let json = r#"{
            "userId": "u1",
            "platform": "twitter",
            "impressions": 10,
            "engagement": 2,
            "posts": 1,
            "lastUpdated": "2025-06-01T00:00:00Z"
        }"#;
        let record: PlatformAnalyticsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.followers, None);
        assert!(record.top_posts.is_empty());
    }
}
