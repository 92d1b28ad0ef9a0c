//! Derived analytics types: aggregated metrics and insights.

use std::collections::BTreeMap;

use growify_core::Platform;
use serde::{Deserialize, Serialize};

/// Totals across all of a user's platform records. Recomputed on every
/// read, never persisted or cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    pub impressions: u64,
    pub engagement: u64,
    pub followers: u64,
    pub posts: u64,
    /// One-decimal percentage string, `"0"` when nothing divides.
    pub engagement_rate: String,
    /// Followers per platform; at most one entry per platform since the
    /// store upserts on (user, platform).
    pub followers_by_platform: BTreeMap<Platform, u64>,
    /// Human-readable breakdown, e.g. `"Instagram: 3.4K • YouTube: 45.8K"`.
    pub followers_breakdown: String,
}

impl AggregatedMetrics {
    /// The all-zero result for a user with no records.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            impressions: 0,
            engagement: 0,
            followers: 0,
            posts: 0,
            engagement_rate: "0".to_string(),
            followers_by_platform: BTreeMap::new(),
            followers_breakdown: String::new(),
        }
    }
}

/// Which rule family produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Engagement,
    TopPost,
    Consistency,
    Audience,
    PlatformTip,
    CrossPlatform,
    SampleData,
    GettingStarted,
}

/// A prioritized, human-readable recommendation.
///
/// `priority` is 1 (high), 2 (medium), or 3 (low); ranked lists sort
/// ascending so high-priority insights come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub text: String,
    pub category: InsightCategory,
    pub icon: &'static str,
    pub color: &'static str,
    pub priority: u8,
}

impl Insight {
    pub(crate) fn new(
        category: InsightCategory,
        icon: &'static str,
        color: &'static str,
        priority: u8,
        text: String,
    ) -> Self {
        debug_assert!((1..=3).contains(&priority));
        Self {
            text,
            category,
            icon,
            color,
            priority,
        }
    }
}
