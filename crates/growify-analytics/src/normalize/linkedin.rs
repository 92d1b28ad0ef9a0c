//! LinkedIn API payload normalization.
//!
//! Engagement is likes + comments + shares. LinkedIn's organic share
//! statistics rarely expose impressions, so missing values fall back to
//! an engagement-based estimate (factor 12), flagged as estimated.

use chrono::{DateTime, Utc};
use growify_core::{Platform, PlatformAnalyticsRecord, PostSummary};
use rand::Rng;
use serde::Deserialize;

use super::{
    caption_or_placeholder, engagement_rate, estimate_impressions, parse_payload, parse_timestamp,
    top_five,
};

const ESTIMATE_FACTOR: u64 = 12;
const ESTIMATE_MAX_OFFSET: u64 = 150;

#[derive(Debug, Default, Deserialize)]
struct RawLinkedIn {
    #[serde(default)]
    follower_count: Option<u64>,
    #[serde(default)]
    posts: Vec<RawPost>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    commentary: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    comments_count: u64,
    #[serde(default)]
    shares_count: u64,
    #[serde(default)]
    impression_count: Option<u64>,
}

pub(super) fn normalize<R: Rng>(
    user_id: &str,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PlatformAnalyticsRecord {
    let raw: RawLinkedIn = parse_payload(Platform::LinkedIn, payload);

    let mut total_impressions = 0_u64;
    let mut total_engagement = 0_u64;

    let posts: Vec<PostSummary> = raw
        .posts
        .iter()
        .map(|post| {
            let engagement = post.like_count + post.comments_count + post.shares_count;
            let (impressions, estimated) = match post.impression_count.filter(|v| *v > 0) {
                Some(measured) => (measured, false),
                None => (
                    estimate_impressions(engagement, ESTIMATE_FACTOR, ESTIMATE_MAX_OFFSET, rng),
                    true,
                ),
            };

            total_impressions += impressions;
            total_engagement += engagement;

            PostSummary {
                id: post.id.clone(),
                caption: caption_or_placeholder(post.commentary.clone(), "LinkedIn Post"),
                timestamp: parse_timestamp(post.created_at.as_deref()),
                likes: post.like_count,
                comments: post.comments_count,
                shares: post.shares_count,
                engagement,
                impressions,
                impressions_estimated: estimated,
                engagement_rate: engagement_rate(engagement, impressions),
            }
        })
        .collect();

    PlatformAnalyticsRecord {
        user_id: user_id.to_string(),
        platform: Platform::LinkedIn,
        impressions: total_impressions,
        engagement: total_engagement,
        followers: raw.follower_count,
        posts: raw.posts.len() as u64,
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
    fn engagement_sums_likes_comments_and_shares() {
        let payload = json!({
            "follower_count": 2600,
            "posts": [{
                "id": "li1",
                "commentary": "hiring announcement",
                "like_count": 55,
                "comments_count": 12,
                "shares_count": 9,
                "impression_count": 4100
            }]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.engagement, 76);
        assert_eq!(record.impressions, 4100);
        assert_eq!(record.followers, Some(2600));
        assert!(!record.top_posts[0].impressions_estimated);
    }

    #[test]
    fn missing_impressions_estimate_with_factor_twelve() {
        let payload = json!({
            "posts": [{"id": "li1", "like_count": 20, "comments_count": 5, "shares_count": 5}]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        let post = &record.top_posts[0];
        assert!(post.impressions_estimated);
        assert!(post.impressions >= 360);
        assert!(post.impressions < 510);
    }

    #[test]
    fn missing_commentary_gets_placeholder() {
        let payload = json!({"posts": [{"id": "li1", "like_count": 3}]});
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.top_posts[0].caption, "LinkedIn Post");
    }

    #[test]
    fn post_count_follows_payload_length() {
        let payload = json!({"posts": [{"id": "a"}, {"id": "b"}, {"id": "c"}]});
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.posts, 3);
    }
}
