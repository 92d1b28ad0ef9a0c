//! Cross-platform metric aggregation.

use std::collections::BTreeMap;

use growify_core::PlatformAnalyticsRecord;

use crate::types::AggregatedMetrics;

/// Merge a user's platform records into dashboard totals.
///
/// The overall engagement rate divides by total followers when any
/// record reported them, falls back to total impressions otherwise, and
/// stays `"0"` when both are zero.
#[must_use]
pub fn aggregate(records: &[PlatformAnalyticsRecord]) -> AggregatedMetrics {
    if records.is_empty() {
        return AggregatedMetrics::empty();
    }

    let mut impressions = 0_u64;
    let mut engagement = 0_u64;
    let mut followers = 0_u64;
    let mut posts = 0_u64;
    let mut followers_by_platform = BTreeMap::new();

    for record in records {
        impressions += record.impressions;
        engagement += record.engagement;
        posts += record.posts;
        if let Some(count) = record.followers {
            followers += count;
            followers_by_platform.insert(record.platform, count);
        }
    }

    let engagement_rate = overall_rate(engagement, followers, impressions);
    let followers_breakdown = followers_by_platform
        .iter()
        .map(|(platform, count)| format!("{}: {}", platform.display_name(), format_count(*count)))
        .collect::<Vec<_>>()
        .join(" \u{2022} ");

    AggregatedMetrics {
        impressions,
        engagement,
        followers,
        posts,
        engagement_rate,
        followers_by_platform,
        followers_breakdown,
    }
}

/// One-decimal percentage string: engagement over followers when known,
/// over impressions otherwise, `"0"` when neither divides.
#[allow(clippy::cast_precision_loss)]
fn overall_rate(engagement: u64, followers: u64, impressions: u64) -> String {
    let denominator = if followers > 0 {
        followers
    } else if impressions > 0 {
        impressions
    } else {
        return "0".to_string();
    };
    format!("{:.1}", engagement as f64 / denominator as f64 * 100.0)
}

/// Compact display form: `1.2M`, `45.8K`, or the plain number.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}
