//! YouTube Data API payload normalization.
//!
//! Views are impressions, taken from the API verbatim: a video platform
//! never estimates. Engagement per video is likes + comments. The Data
//! API serializes statistics counters as strings, so counts accept both
//! string and integer forms.

use chrono::{DateTime, Utc};
use growify_core::{Platform, PlatformAnalyticsRecord, PostSummary};
use serde::{Deserialize, Deserializer};

use super::{caption_or_placeholder, engagement_rate, parse_payload, parse_timestamp, top_five};

#[derive(Debug, Default, Deserialize)]
struct RawYouTube {
    #[serde(default)]
    channel: RawChannel,
    #[serde(default)]
    videos: Vec<RawVideo>,
}

#[derive(Debug, Default, Deserialize)]
struct RawChannel {
    #[serde(default)]
    statistics: RawChannelStats,
}

#[derive(Debug, Default, Deserialize)]
struct RawChannelStats {
    #[serde(default, deserialize_with = "flexible_count")]
    view_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    subscriber_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    video_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVideo {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    statistics: RawVideoStats,
}

#[derive(Debug, Default, Deserialize)]
struct RawVideoStats {
    #[serde(default, deserialize_with = "flexible_count")]
    view_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    like_count: Option<u64>,
    #[serde(default, deserialize_with = "flexible_count")]
    comment_count: Option<u64>,
}

/// Accept `"15420"` or `15420`; anything else counts as absent.
fn flexible_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.parse().ok(),
        None => None,
    })
}

pub(super) fn normalize(
    user_id: &str,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
) -> PlatformAnalyticsRecord {
    let raw: RawYouTube = parse_payload(Platform::YouTube, payload);

    let mut total_engagement = 0_u64;

    let posts: Vec<PostSummary> = raw
        .videos
        .iter()
        .map(|video| {
            let views = video.statistics.view_count.unwrap_or(0);
            let likes = video.statistics.like_count.unwrap_or(0);
            let comments = video.statistics.comment_count.unwrap_or(0);
            let engagement = likes + comments;
            total_engagement += engagement;

            PostSummary {
                id: video.id.clone(),
                caption: caption_or_placeholder(video.title.clone(), "Video"),
                timestamp: parse_timestamp(video.published_at.as_deref()),
                likes,
                comments,
                shares: 0,
                engagement,
                // Views are the impressions for a video platform.
                impressions: views,
                impressions_estimated: false,
                engagement_rate: engagement_rate(engagement, views),
            }
        })
        .collect();

    let video_views_sum: u64 = raw
        .videos
        .iter()
        .map(|v| v.statistics.view_count.unwrap_or(0))
        .sum();

    PlatformAnalyticsRecord {
        user_id: user_id.to_string(),
        platform: Platform::YouTube,
        impressions: raw.channel.statistics.view_count.unwrap_or(video_views_sum),
        engagement: total_engagement,
        followers: raw.channel.statistics.subscriber_count,
        posts: raw
            .channel
            .statistics
            .video_count
            .unwrap_or(raw.videos.len() as u64),
        top_posts: top_five(posts),
        is_sample_data: false,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn views_are_impressions_with_no_estimation() {
        // 892 likes + 127 comments = 1019 engagement; 15420 views verbatim.
        let payload = json!({
            "channel": {"statistics": {"view_count": "15420", "subscriber_count": "45800", "video_count": "1"}},
            "videos": [{
                "id": "yt1",
                "title": "10 Tips for Growing Your Channel",
                "statistics": {"view_count": 15420, "like_count": 892, "comment_count": 127}
            }]
        });
        let record = normalize("u1", &payload, Utc::now());
        assert_eq!(record.engagement, 1019);
        assert_eq!(record.impressions, 15420);
        assert_eq!(record.followers, Some(45800));
        let post = &record.top_posts[0];
        assert_eq!(post.impressions, 15420);
        assert!(!post.impressions_estimated);
        assert!((post.engagement_rate - 6.61).abs() < 0.01);
    }

    #[test]
    fn string_and_numeric_counters_both_parse() {
        let payload = json!({
            "channel": {"statistics": {"view_count": 100, "subscriber_count": "200"}},
            "videos": []
        });
        let record = normalize("u1", &payload, Utc::now());
        assert_eq!(record.impressions, 100);
        assert_eq!(record.followers, Some(200));
    }

    #[test]
    fn missing_channel_views_fall_back_to_video_sum() {
        let payload = json!({
            "videos": [
                {"id": "a", "statistics": {"view_count": 40}},
                {"id": "b", "statistics": {"view_count": 60}}
            ]
        });
        let record = normalize("u1", &payload, Utc::now());
        assert_eq!(record.impressions, 100);
        assert_eq!(record.posts, 2);
    }

    #[test]
    fn missing_title_gets_video_placeholder() {
        let payload = json!({"videos": [{"id": "a"}]});
        let record = normalize("u1", &payload, Utc::now());
        assert_eq!(record.top_posts[0].caption, "Video");
    }

    #[test]
    fn zero_views_yield_zero_rate() {
        let payload = json!({"videos": [{"id": "a", "statistics": {"like_count": 5}}]});
        let record = normalize("u1", &payload, Utc::now());
        assert!((record.top_posts[0].engagement_rate).abs() < f64::EPSILON);
    }
}
