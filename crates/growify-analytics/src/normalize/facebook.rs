//! Facebook Graph API payload normalization.
//!
//! Engagement is reactions + comments + shares. Record-level totals
//! prefer the page insight metrics; when those are missing, the sums of
//! the per-post values stand in. Per-post impressions fall back to an
//! engagement-based estimate (factor 15), flagged as estimated.

use chrono::{DateTime, Utc};
use growify_core::{Platform, PlatformAnalyticsRecord, PostSummary};
use rand::Rng;
use serde::Deserialize;

use super::instagram::{insight_metric, RawInsights, RawMetric};
use super::{
    caption_or_placeholder, engagement_rate, estimate_impressions, parse_payload, parse_timestamp,
    top_five,
};

const ESTIMATE_FACTOR: u64 = 15;
const ESTIMATE_MAX_OFFSET: u64 = 200;

#[derive(Debug, Default, Deserialize)]
struct RawFacebook {
    #[serde(default)]
    page: RawPage,
    /// Page-level insight metrics (`page_impressions`,
    /// `page_post_engagements`), summed over the reporting window.
    #[serde(default)]
    page_insights: Vec<RawMetric>,
    #[serde(default)]
    posts: Vec<RawPost>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPage {
    #[serde(default)]
    followers_count: Option<u64>,
    #[serde(default)]
    fan_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    reactions: Option<RawSummaryHolder>,
    #[serde(default)]
    comments: Option<RawSummaryHolder>,
    #[serde(default)]
    shares: Option<RawShareCount>,
    #[serde(default)]
    insights: Option<RawInsights>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSummaryHolder {
    #[serde(default)]
    summary: RawSummary,
}

#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct RawShareCount {
    #[serde(default)]
    count: u64,
}

fn page_metric(metrics: &[RawMetric], name: &str) -> u64 {
    metrics
        .iter()
        .filter(|m| m.name == name)
        .flat_map(|m| m.values.iter())
        .map(|v| v.value)
        .sum()
}

pub(super) fn normalize<R: Rng>(
    user_id: &str,
    payload: &serde_json::Value,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PlatformAnalyticsRecord {
    let raw: RawFacebook = parse_payload(Platform::Facebook, payload);

    let mut post_impressions_sum = 0_u64;
    let mut post_engagement_sum = 0_u64;

    let posts: Vec<PostSummary> = raw
        .posts
        .iter()
        .map(|post| {
            let reactions = post.reactions.as_ref().map_or(0, |r| r.summary.total_count);
            let comments = post.comments.as_ref().map_or(0, |c| c.summary.total_count);
            let shares = post.shares.as_ref().map_or(0, |s| s.count);
            let engagement = reactions + comments + shares;

            let (impressions, estimated) =
                match insight_metric(post.insights.as_ref(), "post_impressions") {
                    Some(measured) => (measured, false),
                    None => (
                        estimate_impressions(engagement, ESTIMATE_FACTOR, ESTIMATE_MAX_OFFSET, rng),
                        true,
                    ),
                };

            post_impressions_sum += impressions;
            post_engagement_sum += engagement;

            PostSummary {
                id: post.id.clone(),
                caption: caption_or_placeholder(post.message.clone(), "Facebook Post"),
                timestamp: parse_timestamp(post.created_time.as_deref()),
                likes: reactions,
                comments,
                shares,
                engagement,
                impressions,
                impressions_estimated: estimated,
                engagement_rate: engagement_rate(engagement, impressions),
            }
        })
        .collect();

    // Page insights win when reported; post-derived sums otherwise.
    let mut impressions = page_metric(&raw.page_insights, "page_impressions");
    if impressions == 0 {
        impressions = post_impressions_sum;
    }
    let mut engagement = page_metric(&raw.page_insights, "page_post_engagements");
    if engagement == 0 {
        engagement = post_engagement_sum;
    }

    PlatformAnalyticsRecord {
        user_id: user_id.to_string(),
        platform: Platform::Facebook,
        impressions,
        engagement,
        followers: raw.page.followers_count.or(raw.page.fan_count),
        posts: raw.posts.len() as u64,
        top_posts: top_five(posts),
        is_sample_data: false,
        last_updated: now,
    }
}
