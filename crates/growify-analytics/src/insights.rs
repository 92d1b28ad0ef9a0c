//! Rule-based insight derivation.
//!
//! Every rule is evaluated independently per record and multiple rules
//! may fire; the combined list is stable-sorted by ascending priority
//! and optionally truncated. A rule whose input is absent is skipped,
//! never an error, and an empty record set yields the fixed
//! getting-started insights.

use growify_core::{Platform, PlatformAnalyticsRecord};

use crate::types::{Insight, InsightCategory};

/// Cap applied on the profile surface.
pub const PROFILE_INSIGHT_CAP: usize = 6;

/// Derive ranked insights from a user's platform records.
#[must_use]
pub fn derive_insights(records: &[PlatformAnalyticsRecord], cap: Option<usize>) -> Vec<Insight> {
    if records.is_empty() {
        return getting_started();
    }

    let mut insights = Vec::new();
    let mut total_engagement = 0_u64;
    let mut total_impressions = 0_u64;
    let mut best_platform: Option<(Platform, f64)> = None;

    for record in records {
        let name = record.platform.display_name();
        total_engagement += record.engagement;
        total_impressions += record.impressions;

        // Sample records never back the top-performer claim.
        if !record.is_sample_data && record.impressions > 0 {
            #[allow(clippy::cast_precision_loss)]
            let rate = record.engagement as f64 / record.impressions as f64 * 100.0;
            if best_platform.is_none_or(|(_, best)| rate > best) {
                best_platform = Some((record.platform, rate));
            }
        }

        engagement_tier(record, name, &mut insights);
        top_post_callout(record, name, &mut insights);
        posting_frequency(record, name, &mut insights);
        audience_size(record, name, &mut insights);
        insights.push(platform_tip(record.platform));

        if record.is_sample_data {
            insights.push(Insight::new(
                InsightCategory::SampleData,
                "flask-outline",
                "#607d8b",
                3,
                format!(
                    "\u{1f9ea} {name} is showing sample data. Connect the account to see live metrics."
                ),
            ));
        }
    }

    if records.len() > 1 {
        if let Some((platform, rate)) = best_platform {
            insights.push(Insight::new(
                InsightCategory::CrossPlatform,
                "medal",
                "#FF6F00",
                1,
                format!(
                    "\u{1f947} {} is your top performing platform with {rate:.1}% engagement. Double down on this platform!",
                    platform.display_name()
                ),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let overall = if total_impressions > 0 {
            total_engagement as f64 / total_impressions as f64 * 100.0
        } else {
            0.0
        };
        insights.push(Insight::new(
            InsightCategory::CrossPlatform,
            "chart-arc",
            "#00BCD4",
            2,
            format!(
                "\u{1f4c8} Overall engagement rate: {overall:.1}%. Cross-post your best content to all platforms for maximum reach."
            ),
        ));
    }

    // Stable sort keeps emission order within a priority band.
    insights.sort_by_key(|i| i.priority);
    if let Some(cap) = cap {
        insights.truncate(cap);
    }
    insights
}

fn engagement_tier(record: &PlatformAnalyticsRecord, name: &str, out: &mut Vec<Insight>) {
    if record.impressions == 0 {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = record.engagement as f64 / record.impressions as f64 * 100.0;
    // Compare the displayed one-decimal value, so 5.04% reads and ranks
    // as 5.0%.
    let rate = (rate * 10.0).round() / 10.0;
    let insight = if rate > 5.0 {
        Insight::new(
            InsightCategory::Engagement,
            "trending-up",
            "#4caf50",
            1,
            format!(
                "\u{1f680} Your {name} engagement rate is {rate:.1}% - Outstanding! Your audience loves your content."
            ),
        )
    } else if rate > 2.0 {
        Insight::new(
            InsightCategory::Engagement,
            "chart-line",
            "#ff9800",
            2,
            format!(
                "\u{1f4ca} {name} engagement: {rate:.1}%. Try polls, questions, or behind-the-scenes content to boost interaction."
            ),
        )
    } else {
        Insight::new(
            InsightCategory::Engagement,
            "lightbulb-on",
            "#2196f3",
            3,
            format!(
                "\u{1f4a1} {name} engagement: {rate:.1}%. Focus on storytelling and add strong calls-to-action to increase engagement."
            ),
        )
    };
    out.push(insight);
}

fn top_post_callout(record: &PlatformAnalyticsRecord, name: &str, out: &mut Vec<Insight>) {
    let Some(best) = record.top_posts.first() else {
        return;
    };

    let truncated: String = best.caption.chars().take(60).collect();
    let ellipsis = if best.caption.chars().count() > 60 {
        "..."
    } else {
        ""
    };
    out.push(Insight::new(
        InsightCategory::TopPost,
        "star",
        "#FFD700",
        1,
        format!(
            "\u{2b50} Best {name} post: \"{truncated}{ellipsis}\" with {} engagements!",
            best.engagement
        ),
    ));

    if best.likes > best.comments * 5 {
        out.push(Insight::new(
            InsightCategory::TopPost,
            "heart",
            "#e91e63",
            2,
            format!(
                "\u{2764}\u{fe0f} Your {name} content gets lots of likes! Encourage more comments by asking questions."
            ),
        ));
    }
}

fn posting_frequency(record: &PlatformAnalyticsRecord, name: &str, out: &mut Vec<Insight>) {
    if record.posts == 0 {
        return;
    }
    let insight = if record.posts < 5 {
        Insight::new(
            InsightCategory::Consistency,
            "calendar-plus",
            "#ff5722",
            3,
            format!(
                "\u{1f4c5} You have {} posts on {name}. Post 3-5 times per week for optimal reach and engagement.",
                record.posts
            ),
        )
    } else if record.posts >= 10 {
        Insight::new(
            InsightCategory::Consistency,
            "check-all",
            "#4caf50",
            1,
            format!(
                "\u{2705} Excellent! {} posts on {name}. Your consistency is building audience trust.",
                record.posts
            ),
        )
    } else {
        Insight::new(
            InsightCategory::Consistency,
            "calendar-check",
            "#03a9f4",
            2,
            format!(
                "\u{1f4c6} Good progress with {} {name} posts. Keep the momentum going!",
                record.posts
            ),
        )
    };
    out.push(insight);
}

fn audience_size(record: &PlatformAnalyticsRecord, name: &str, out: &mut Vec<Insight>) {
    // Absent and zero both suppress the rule: no audience claim without
    // a known, non-zero count.
    let Some(followers) = record.followers.filter(|f| *f > 0) else {
        return;
    };
    let insight = if followers < 1_000 {
        Insight::new(
            InsightCategory::Audience,
            "account-plus",
            "#9c27b0",
            3,
            format!(
                "\u{1f465} Growing your {name} community ({followers} followers). Share valuable content and engage with similar accounts."
            ),
        )
    } else if followers < 10_000 {
        Insight::new(
            InsightCategory::Audience,
            "account-group",
            "#673ab7",
            2,
            format!(
                "\u{1f3af} {} {name} followers! You're building a strong community. Stay consistent.",
                thousands(followers)
            ),
        )
    } else {
        Insight::new(
            InsightCategory::Audience,
            "trophy",
            "#FFD700",
            1,
            format!(
                "\u{1f3c6} Amazing! {} {name} followers. You're an influencer! Keep creating great content.",
                thousands(followers)
            ),
        )
    };
    out.push(insight);
}

fn platform_tip(platform: Platform) -> Insight {
    let text = match platform {
        Platform::Facebook => {
            "\u{1f4f1} Facebook tip: Post during 1-3 PM for maximum reach. Use videos and live streams to boost engagement."
        }
        Platform::Instagram => {
            "\u{1f4f8} Instagram tip: Use 8-12 relevant hashtags, post Reels for viral reach, and engage within the first hour."
        }
        Platform::Twitter => {
            "\u{1f426} Twitter tip: Post 3-5 times daily, use trending hashtags, and create threads for better engagement."
        }
        Platform::LinkedIn => {
            "\u{1f4bc} LinkedIn tip: Share industry insights, post on weekday mornings, and engage with comments professionally."
        }
        Platform::YouTube => {
            "\u{25b6}\u{fe0f} YouTube tip: Upload on a fixed weekly schedule and front-load keywords in your titles and descriptions."
        }
    };
    Insight::new(
        InsightCategory::PlatformTip,
        platform.as_str(),
        platform.brand_color(),
        3,
        text.to_string(),
    )
}

/// The fixed starter set shown before any account is connected.
fn getting_started() -> Vec<Insight> {
    vec![
        Insight::new(
            InsightCategory::GettingStarted,
            "link-variant",
            "#667eea",
            1,
            "\u{1f517} Connect your social media accounts to unlock personalized analytics and insights!".to_string(),
        ),
        Insight::new(
            InsightCategory::GettingStarted,
            "calendar-clock",
            "#03a9f4",
            2,
            "\u{1f4c5} Plan a posting schedule of 3-5 posts per week to build momentum from day one.".to_string(),
        ),
        Insight::new(
            InsightCategory::GettingStarted,
            "lightbulb-on",
            "#2196f3",
            3,
            "\u{1f4a1} Start with one platform where your audience already is, then expand.".to_string(),
        ),
    ]
}

/// Thousands-separated display form, e.g. `45,800`.
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
