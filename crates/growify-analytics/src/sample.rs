//! Demo-mode analytics fixtures.
//!
//! When a platform cannot be synced (no API key, no connected account)
//! the app still needs something to render. These records carry
//! realistic numbers, are flagged `is_sample_data`, and flow through the
//! same aggregation and insight paths as live records.

use chrono::{DateTime, Duration, Utc};
use growify_core::{Platform, PlatformAnalyticsRecord, PostSummary};

struct SamplePost {
    id: &'static str,
    caption: &'static str,
    days_ago: i64,
    likes: u64,
    comments: u64,
    shares: u64,
    impressions: u64,
}

/// Build the demo record for a platform, timestamped relative to `now`.
#[must_use]
pub fn sample_record(
    user_id: &str,
    platform: Platform,
    now: DateTime<Utc>,
) -> PlatformAnalyticsRecord {
    let (followers, fixtures) = match platform {
        Platform::Instagram => (3_450, INSTAGRAM_POSTS),
        Platform::YouTube => (45_800, YOUTUBE_POSTS),
        Platform::Facebook => (1_820, FACEBOOK_POSTS),
        Platform::Twitter => (980, TWITTER_POSTS),
        Platform::LinkedIn => (2_640, LINKEDIN_POSTS),
    };

    let mut posts: Vec<PostSummary> = fixtures
        .iter()
        .map(|p| {
            let engagement = p.likes + p.comments + p.shares;
            #[allow(clippy::cast_precision_loss)]
            let rate = if p.impressions > 0 {
                let raw = engagement as f64 / p.impressions as f64 * 100.0;
                (raw * 100.0).round() / 100.0
            } else {
                0.0
            };
            PostSummary {
                id: p.id.to_string(),
                caption: p.caption.to_string(),
                timestamp: Some(now - Duration::days(p.days_ago)),
                likes: p.likes,
                comments: p.comments,
                shares: p.shares,
                engagement,
                impressions: p.impressions,
                impressions_estimated: false,
                engagement_rate: rate,
            }
        })
        .collect();
    posts.sort_by_key(|p| std::cmp::Reverse(p.engagement));

    let impressions = posts.iter().map(|p| p.impressions).sum();
    let engagement = posts.iter().map(|p| p.engagement).sum();

    PlatformAnalyticsRecord {
        user_id: user_id.to_string(),
        platform,
        impressions,
        engagement,
        followers: Some(followers),
        posts: posts.len() as u64,
        top_posts: posts,
        is_sample_data: true,
        last_updated: now,
    }
}

const INSTAGRAM_POSTS: &[SamplePost] = &[
    SamplePost {
        id: "sample_1",
        caption: "\u{1f31f} Excited to share our latest project! What do you think? #design #creative",
        days_ago: 2,
        likes: 245,
        comments: 18,
        shares: 0,
        impressions: 2_850,
    },
    SamplePost {
        id: "sample_2",
        caption: "\u{2728} Behind the scenes of our creative process \u{1f4f8}",
        days_ago: 5,
        likes: 189,
        comments: 12,
        shares: 0,
        impressions: 2_100,
    },
    SamplePost {
        id: "sample_3",
        caption: "\u{1f680} Launching something amazing soon! Stay tuned... #comingsoon",
        days_ago: 7,
        likes: 312,
        comments: 25,
        shares: 0,
        impressions: 3_400,
    },
    SamplePost {
        id: "sample_4",
        caption: "\u{1f4a1} Tips and tricks for better content creation",
        days_ago: 10,
        likes: 156,
        comments: 9,
        shares: 0,
        impressions: 1_800,
    },
    SamplePost {
        id: "sample_5",
        caption: "\u{1f3a8} Inspiration from our creative team #creativity #design",
        days_ago: 14,
        likes: 198,
        comments: 11,
        shares: 0,
        impressions: 2_250,
    },
];

const YOUTUBE_POSTS: &[SamplePost] = &[
    SamplePost {
        id: "sample_yt_1",
        caption: "10 Tips for Growing Your YouTube Channel in 2025 \u{1f680}",
        days_ago: 3,
        likes: 892,
        comments: 127,
        shares: 0,
        impressions: 15_420,
    },
    SamplePost {
        id: "sample_yt_2",
        caption: "My Content Creation Setup Tour | Behind the Scenes",
        days_ago: 7,
        likes: 745,
        comments: 98,
        shares: 0,
        impressions: 12_350,
    },
    SamplePost {
        id: "sample_yt_3",
        caption: "How I Edited This Video in 30 Minutes | Tutorial",
        days_ago: 10,
        likes: 1_456,
        comments: 234,
        shares: 0,
        impressions: 23_100,
    },
    SamplePost {
        id: "sample_yt_4",
        caption: "Q&A: Your Questions About Content Growth Answered",
        days_ago: 14,
        likes: 567,
        comments: 156,
        shares: 0,
        impressions: 9_870,
    },
    SamplePost {
        id: "sample_yt_5",
        caption: "The BEST Time to Post on Social Media (Data-Driven)",
        days_ago: 18,
        likes: 1_123,
        comments: 189,
        shares: 0,
        impressions: 18_900,
    },
];

const FACEBOOK_POSTS: &[SamplePost] = &[
    SamplePost {
        id: "sample_fb_1",
        caption: "Big news coming to our page this week. Stay tuned!",
        days_ago: 2,
        likes: 96,
        comments: 14,
        shares: 11,
        impressions: 2_400,
    },
    SamplePost {
        id: "sample_fb_2",
        caption: "Thank you to everyone who joined our live session yesterday",
        days_ago: 6,
        likes: 142,
        comments: 31,
        shares: 18,
        impressions: 3_150,
    },
    SamplePost {
        id: "sample_fb_3",
        caption: "Weekend read: how small brands win on social",
        days_ago: 11,
        likes: 74,
        comments: 9,
        shares: 6,
        impressions: 1_900,
    },
];

const TWITTER_POSTS: &[SamplePost] = &[
    SamplePost {
        id: "sample_tw_1",
        caption: "Hot take: consistency beats virality every single time",
        days_ago: 1,
        likes: 58,
        comments: 12,
        shares: 21,
        impressions: 2_600,
    },
    SamplePost {
        id: "sample_tw_2",
        caption: "We just crossed a big milestone. Thread below \u{1f447}",
        days_ago: 4,
        likes: 83,
        comments: 19,
        shares: 34,
        impressions: 3_900,
    },
    SamplePost {
        id: "sample_tw_3",
        caption: "What's the one tool you can't create content without?",
        days_ago: 9,
        likes: 41,
        comments: 27,
        shares: 8,
        impressions: 1_750,
    },
];

const LINKEDIN_POSTS: &[SamplePost] = &[
    SamplePost {
        id: "sample_li_1",
        caption: "Lessons from a year of building in public",
        days_ago: 3,
        likes: 128,
        comments: 22,
        shares: 15,
        impressions: 3_300,
    },
    SamplePost {
        id: "sample_li_2",
        caption: "We're hiring! Come help us build the future of creator analytics",
        days_ago: 8,
        likes: 97,
        comments: 18,
        shares: 24,
        impressions: 2_850,
    },
    SamplePost {
        id: "sample_li_3",
        caption: "Three metrics every marketing team should watch weekly",
        days_ago: 13,
        likes: 66,
        comments: 11,
        shares: 9,
        impressions: 1_950,
    },
];
