//! Instagram Graph API payload normalization.
//!
//! Engagement is likes + comments. Impressions come from the media
//! insights metric when present; otherwise they are estimated from
//! engagement (factor 10) and flagged as estimated.

use chrono::{DateTime, Utc};
use growify_core::{Platform, PlatformAnalyticsRecord, PostSummary};
use rand::Rng;
use serde::Deserialize;

use super::{
    caption_or_placeholder, engagement_rate, estimate_impressions, parse_payload, parse_timestamp,
    top_five,
};

const ESTIMATE_FACTOR: u64 = 10;
const ESTIMATE_MAX_OFFSET: u64 = 100;

#[derive(Debug, Default, Deserialize)]
struct RawInstagram {
    #[serde(default)]
    followers_count: Option<u64>,
    #[serde(default)]
    media_count: Option<u64>,
    #[serde(default)]
    media: Vec<RawMedia>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMedia {
    #[serde(default)]
    id: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    comments_count: u64,
    #[serde(default)]
    insights: Option<RawInsights>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawInsights {
    #[serde(default)]
    pub(super) data: Vec<RawMetric>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawMetric {
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) values: Vec<RawMetricValue>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawMetricValue {
    #[serde(default)]
    pub(super) value: u64,
}

/// First value of the named insight metric, when the API returned one.
pub(super) fn insight_metric(insights: Option<&RawInsights>, name: &str) -> Option<u64> {
    insights?
        .data
        .iter()
        .find(|m| m.name == name)
        .and_then(|m| m.values.first())
        .map(|v| v.value)
        .filter(|v| *v > 0)
}

pub(super) fn normalize<R: Rng>(
    user_id: &str,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PlatformAnalyticsRecord {
    let raw: RawInstagram = parse_payload(Platform::Instagram, payload);

    let mut total_impressions = 0_u64;
    let mut total_engagement = 0_u64;

    let posts: Vec<PostSummary> = raw
        .media
        .iter()
        .map(|media| {
            let engagement = media.like_count + media.comments_count;
            let (impressions, estimated) =
                match insight_metric(media.insights.as_ref(), "impressions") {
                    Some(measured) => (measured, false),
                    None => (
                        estimate_impressions(engagement, ESTIMATE_FACTOR, ESTIMATE_MAX_OFFSET, rng),
                        true,
                    ),
                };

            total_impressions += impressions;
            total_engagement += engagement;

            PostSummary {
                id: media.id.clone(),
                caption: caption_or_placeholder(media.caption.clone(), "Instagram Post"),
                timestamp: parse_timestamp(media.timestamp.as_deref()),
                likes: media.like_count,
                comments: media.comments_count,
                shares: 0,
                engagement,
                impressions,
                impressions_estimated: estimated,
                engagement_rate: engagement_rate(engagement, impressions),
            }
        })
        .collect();

    let post_count = raw.media.len() as u64;

    PlatformAnalyticsRecord {
        user_id: user_id.to_string(),
        platform: Platform::Instagram,
        impressions: total_impressions,
        engagement: total_engagement,
        followers: raw.followers_count,
        posts: raw.media_count.unwrap_or(post_count),
        top_posts: top_five(posts),
        is_sample_data: false,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn measured_impressions_are_used_verbatim() {
        let payload = json!({
            "followers_count": 3450,
            "media_count": 1,
            "media": [{
                "id": "p1",
                "caption": "launch day",
                "like_count": 245,
                "comments_count": 18,
                "insights": {"data": [
                    {"name": "impressions", "values": [{"value": 2850}]},
                    {"name": "reach", "values": [{"value": 2100}]}
                ]}
            }]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.impressions, 2850);
        assert_eq!(record.engagement, 263);
        assert_eq!(record.followers, Some(3450));
        let post = &record.top_posts[0];
        assert!(!post.impressions_estimated);
        assert!((post.engagement_rate - 9.23).abs() < 0.01);
    }

    #[test]
    fn missing_insights_fall_back_to_flagged_estimate() {
        let payload = json!({
            "media": [{"id": "p1", "caption": "no insights", "like_count": 40, "comments_count": 10}]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        let post = &record.top_posts[0];
        assert!(post.impressions_estimated);
        assert!(post.impressions >= 500, "estimate below engagement * 10");
        assert!(post.impressions < 600, "offset exceeded its bound");
    }

    #[test]
    fn missing_caption_gets_placeholder() {
        let payload = json!({"media": [{"id": "p1", "like_count": 1, "comments_count": 0}]});
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.top_posts[0].caption, "Instagram Post");
    }

    #[test]
    fn absent_followers_stay_none() {
        let payload = json!({"media": []});
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.followers, None);
        assert_eq!(record.posts, 0);
    }

    #[test]
    fn garbage_payload_yields_empty_record() {
        let payload = json!("not an object");
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.engagement, 0);
        assert!(record.top_posts.is_empty());
    }

    #[test]
    fn top_posts_capped_at_five() {
        let media: Vec<serde_json::Value> = (0..8)
            .map(|i| json!({"id": format!("p{i}"), "like_count": i * 10, "comments_count": 0}))
            .collect();
        let record = normalize("u1", &json!({"media": media}), Utc::now(), &mut rng());
        assert_eq!(record.top_posts.len(), 5);
        assert_eq!(record.top_posts[0].id, "p7");
    }
}
