//! Per-platform metric normalization.
//!
//! Each platform module converts that platform's raw API payload into a
//! [`PlatformAnalyticsRecord`]. Normalization is deliberately tolerant:
//! missing fields default rather than fail, and a post without a caption
//! gets a platform placeholder string. Only the surrounding sync layer
//! surfaces network or auth errors.

mod facebook;
mod instagram;
mod linkedin;
mod twitter;
mod youtube;

use chrono::{DateTime, Utc};
use growify_core::{Platform, PlatformAnalyticsRecord, PostSummary};
use rand::Rng;

/// Normalize a raw platform payload into the unified analytics record.
///
/// Impression estimation for social-graph platforms adds a small random
/// offset; use [`normalize_with_rng`] with a seeded RNG when the output
/// must be reproducible.
#[must_use]
pub fn normalize(
    user_id: &str,
    platform: Platform,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
) -> PlatformAnalyticsRecord {
    normalize_with_rng(user_id, platform, payload, now, &mut rand::rng())
}

/// [`normalize`] with a caller-supplied RNG for the estimation offsets.
#[must_use]
pub fn normalize_with_rng<R: Rng>(
    user_id: &str,
    platform: Platform,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PlatformAnalyticsRecord {
    match platform {
        Platform::Instagram => instagram::normalize(user_id, payload, now, rng),
        Platform::Facebook => facebook::normalize(user_id, payload, now, rng),
        Platform::YouTube => youtube::normalize(user_id, payload, now),
        Platform::Twitter => twitter::normalize(user_id, payload, now, rng),
        Platform::LinkedIn => linkedin::normalize(user_id, payload, now, rng),
    }
}

/// Deserialize a raw payload, logging and falling back to the empty
/// shape when it does not match the platform's schema.
pub(crate) fn parse_payload<T>(platform: Platform, payload: &serde_json::Value) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match serde_json::from_value(payload.clone()) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(%platform, %error, "payload did not match the platform schema, normalizing as empty");
            T::default()
        }
    }
}

/// engagement / impressions * 100, rounded to 2 decimals. Zero
/// impressions yield a rate of 0 rather than a division error.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn engagement_rate(engagement: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    let rate = engagement as f64 / impressions as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Fallback impression estimate for platforms that did not report any:
/// a linear function of engagement plus a small random offset. This is a
/// heuristic, not a measurement; callers mark the result as estimated.
pub(crate) fn estimate_impressions<R: Rng>(
    engagement: u64,
    factor: u64,
    max_offset: u64,
    rng: &mut R,
) -> u64 {
    engagement * factor + rng.random_range(0..max_offset)
}

/// Keep the five highest-engagement posts, descending. `sort_by_key` is
/// stable, so payload order breaks ties.
pub(crate) fn top_five(mut posts: Vec<PostSummary>) -> Vec<PostSummary> {
    posts.sort_by_key(|p| std::cmp::Reverse(p.engagement));
    posts.truncate(5);
    posts
}

/// Caption with the platform placeholder for posts that arrived without
/// one. Identity gaps are tolerated, not fatal.
pub(crate) fn caption_or_placeholder(caption: Option<String>, placeholder: &str) -> String {
    match caption {
        Some(c) if !c.is_empty() => c,
        _ => placeholder.to_string(),
    }
}

pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn post(id: &str, engagement: u64) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            caption: String::new(),
            timestamp: None,
            likes: engagement,
            comments: 0,
            shares: 0,
            engagement,
            impressions: 0,
            impressions_estimated: false,
            engagement_rate: 0.0,
        }
    }

    #[test]
    fn engagement_rate_rounds_to_two_decimals() {
        assert!((engagement_rate(1019, 15420) - 6.61).abs() < f64::EPSILON);
    }

    #[test]
    fn engagement_rate_zero_impressions_is_zero() {
        assert!((engagement_rate(100, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn top_five_sorts_descending_and_truncates() {
        let posts = vec![
            post("a", 10),
            post("b", 50),
            post("c", 30),
            post("d", 40),
            post("e", 20),
            post("f", 60),
        ];
        let top = top_five(posts);
        let ids: Vec<&str> = top.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["f", "b", "d", "c", "e"]);
    }

    #[test]
    fn top_five_ties_keep_payload_order() {
        let posts = vec![post("first", 10), post("second", 10), post("third", 10)];
        let top = top_five(posts);
        let ids: Vec<&str> = top.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn estimate_is_linear_in_engagement_plus_bounded_offset() {
        let mut rng = SmallRng::seed_from_u64(7);
        for engagement in [1_u64, 50, 400] {
            let estimate = estimate_impressions(engagement, 10, 100, &mut rng);
            assert!(estimate >= engagement * 10);
            assert!(estimate < engagement * 10 + 100);
        }
    }

    #[test]
    fn empty_caption_gets_placeholder() {
        assert_eq!(
            caption_or_placeholder(Some(String::new()), "Instagram Post"),
            "Instagram Post"
        );
        assert_eq!(
            caption_or_placeholder(None, "Video"),
            "Video"
        );
        assert_eq!(
            caption_or_placeholder(Some("hello".into()), "Video"),
            "hello"
        );
    }
}
