//! Twitter API v2 payload normalization.
//!
//! Engagement is likes + replies + retweets. The v2 `impression_count`
//! public metric is used when reported; otherwise impressions are
//! estimated from engagement (factor 12) and flagged.

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
struct RawTwitter {
    #[serde(default)]
    user: RawUser,
    #[serde(default)]
    tweets: Vec<RawTweet>,
}

#[derive(Debug, Default, Deserialize)]
struct RawUser {
    #[serde(default)]
    public_metrics: RawUserMetrics,
}

#[derive(Debug, Default, Deserialize)]
struct RawUserMetrics {
    #[serde(default)]
    followers_count: Option<u64>,
    #[serde(default)]
    tweet_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTweet {
    #[serde(default)]
    id: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    public_metrics: RawTweetMetrics,
}

#[derive(Debug, Default, Deserialize)]
struct RawTweetMetrics {
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    reply_count: u64,
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    impression_count: Option<u64>,
}

pub(super) fn normalize<R: Rng>(
    user_id: &str,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PlatformAnalyticsRecord {
    let raw: RawTwitter = parse_payload(Platform::Twitter, payload);

    let mut total_impressions = 0_u64;
    let mut total_engagement = 0_u64;

    let posts: Vec<PostSummary> = raw
        .tweets
        .iter()
        .map(|tweet| {
            let metrics = &tweet.public_metrics;
            let engagement = metrics.like_count + metrics.reply_count + metrics.retweet_count;
            let (impressions, estimated) = match metrics.impression_count.filter(|v| *v > 0) {
                Some(measured) => (measured, false),
                None => (
                    estimate_impressions(engagement, ESTIMATE_FACTOR, ESTIMATE_MAX_OFFSET, rng),
                    true,
                ),
            };

            total_impressions += impressions;
            total_engagement += engagement;

            PostSummary {
                id: tweet.id.clone(),
                caption: caption_or_placeholder(tweet.text.clone(), "Tweet"),
                timestamp: parse_timestamp(tweet.created_at.as_deref()),
                likes: metrics.like_count,
                comments: metrics.reply_count,
                shares: metrics.retweet_count,
                engagement,
                impressions,
                impressions_estimated: estimated,
                engagement_rate: engagement_rate(engagement, impressions),
            }
        })
        .collect();

    PlatformAnalyticsRecord {
        user_id: user_id.to_string(),
        platform: Platform::Twitter,
        impressions: total_impressions,
        engagement: total_engagement,
        followers: raw.user.public_metrics.followers_count,
        posts: raw
            .user
            .public_metrics
            .tweet_count
            .unwrap_or(raw.tweets.len() as u64),
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
    fn reported_impression_count_is_preferred() {
        let payload = json!({
            "user": {"public_metrics": {"followers_count": 820, "tweet_count": 154}},
            "tweets": [{
                "id": "t1",
                "text": "shipping something new",
                "public_metrics": {
                    "like_count": 44, "reply_count": 6, "retweet_count": 10,
                    "impression_count": 5200
                }
            }]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.engagement, 60);
        assert_eq!(record.impressions, 5200);
        assert_eq!(record.followers, Some(820));
        assert_eq!(record.posts, 154);
        assert!(!record.top_posts[0].impressions_estimated);
    }

    #[test]
    fn missing_impressions_estimate_with_factor_twelve() {
        let payload = json!({
            "tweets": [{
                "id": "t1",
                "public_metrics": {"like_count": 10, "reply_count": 5, "retweet_count": 5}
            }]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        let post = &record.top_posts[0];
        assert!(post.impressions_estimated);
        assert!(post.impressions >= 240);
        assert!(post.impressions < 390);
    }

    #[test]
    fn retweets_count_as_shares() {
        let payload = json!({
            "tweets": [{"id": "t1", "public_metrics": {"retweet_count": 7, "impression_count": 10}}]
        });
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.top_posts[0].shares, 7);
    }

    #[test]
    fn missing_text_gets_tweet_placeholder() {
        let payload = json!({"tweets": [{"id": "t1"}]});
        let record = normalize("u1", &payload, Utc::now(), &mut rng());
        assert_eq!(record.top_posts[0].caption, "Tweet");
    }
}
