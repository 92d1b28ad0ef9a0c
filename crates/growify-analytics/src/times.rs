//! Posting-time analysis and period-over-period growth.

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike};
use growify_core::{PlatformAnalyticsRecord, PostSummary};
use serde::Serialize;

/// A recommended posting slot, either derived from the user's post
/// history or from the fixed default table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingSlot {
    pub time: String,
    pub day: String,
    pub engagement: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingTimes {
    /// Up to three slots, best first.
    pub slots: Vec<PostingSlot>,
    /// Weekday with the most engagement, when history carries timestamps.
    pub best_weekday: Option<String>,
    pub derived_from_history: bool,
}

/// Rank posting hours by average engagement across the given posts.
///
/// Posts without a timestamp are skipped; when nothing remains the
/// fixed default recommendations stand in.
#[must_use]
pub fn best_posting_times(posts: &[PostSummary]) -> PostingTimes {
    let mut by_hour: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
    let mut by_weekday: BTreeMap<u8, u64> = BTreeMap::new();

    for post in posts {
        let Some(ts) = post.timestamp else { continue };
        let slot = by_hour.entry(ts.hour()).or_insert((0, 0));
        slot.0 += post.engagement;
        slot.1 += 1;
        *by_weekday
            .entry(ts.weekday().num_days_from_monday() as u8)
            .or_insert(0) += post.engagement;
    }

    if by_hour.is_empty() {
        return PostingTimes {
            slots: default_slots(),
            best_weekday: None,
            derived_from_history: false,
        };
    }

    let mut averages: Vec<(u32, u64)> = by_hour
        .into_iter()
        .map(|(hour, (total, count))| (hour, total / count))
        .collect();
    // Descending by average; the BTreeMap order breaks ties on the
    // earlier hour.
    averages.sort_by_key(|(_, avg)| std::cmp::Reverse(*avg));
    averages.truncate(3);

    let slots = averages
        .into_iter()
        .map(|(hour, avg)| PostingSlot {
            time: format!("{hour}:00"),
            day: if hour < 17 { "Weekdays" } else { "Evening" }.to_string(),
            engagement: format!("{avg} avg engagement"),
            reason: "Based on your data".to_string(),
        })
        .collect();

    let best_weekday = by_weekday
        .iter()
        .max_by_key(|(_, engagement)| *engagement)
        .map(|(day, _)| weekday_name(*day).to_string());

    PostingTimes {
        slots,
        best_weekday,
        derived_from_history: true,
    }
}

fn default_slots() -> Vec<PostingSlot> {
    let table = [
        ("9:00 AM", "Weekdays", "85%", "Morning commute time"),
        ("12:00 PM", "Daily", "88%", "Lunch break peak"),
        ("7:00 PM", "Weekdays", "92%", "Evening relaxation time"),
        ("3:00 PM", "Weekends", "80%", "Weekend afternoon activity"),
    ];
    table
        .into_iter()
        .map(|(time, day, engagement, reason)| PostingSlot {
            time: time.to_string(),
            day: day.to_string(),
            engagement: engagement.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}

fn weekday_name(num_from_monday: u8) -> &'static str {
    match num_from_monday {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
}

/// Which metric a growth observation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthKind {
    FollowerGrowth,
    Engagement,
}

/// A period-over-period change observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthInsight {
    pub kind: GrowthKind,
    pub message: String,
    pub delta: f64,
}

/// Compare two periods of the same platform record. An observation is
/// emitted only when both periods report the metric.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_insights(
    current: &PlatformAnalyticsRecord,
    previous: &PlatformAnalyticsRecord,
) -> Vec<GrowthInsight> {
    let mut insights = Vec::new();

    if let (Some(now), Some(before)) = (current.followers, previous.followers) {
        if before > 0 {
            let growth = (now as f64 - before as f64) / before as f64 * 100.0;
            let growth = (growth * 10.0).round() / 10.0;
            let verb = if growth > 0.0 { "grew" } else { "decreased" };
            insights.push(GrowthInsight {
                kind: GrowthKind::FollowerGrowth,
                message: format!(
                    "Your followers {verb} by {:.1}% this period",
                    growth.abs()
                ),
                delta: growth,
            });
        }
    }

    if current.engagement > 0 && previous.engagement > 0 {
        let change = current.engagement as f64 - previous.engagement as f64;
        let verb = if change > 0.0 { "increased" } else { "decreased" };
        insights.push(GrowthInsight {
            kind: GrowthKind::Engagement,
            message: format!("Engagement {verb} by {:.1} this period", change.abs()),
            delta: change,
        });
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use growify_core::Platform;

    fn post(hour: u32, day: u32, engagement: u64) -> PostSummary {
        PostSummary {
            id: format!("p{hour}-{day}"),
            caption: String::new(),
            // June 2025: the 2nd is a Monday.
            timestamp: Some(Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()),
            likes: engagement,
            comments: 0,
            shares: 0,
            engagement,
            impressions: 0,
            impressions_estimated: false,
            engagement_rate: 0.0,
        }
    }

    fn record(followers: Option<u64>, engagement: u64) -> PlatformAnalyticsRecord {
        PlatformAnalyticsRecord {
            user_id: "u1".to_string(),
            platform: Platform::Instagram,
            impressions: 0,
            engagement,
            followers,
            posts: 0,
            top_posts: Vec::new(),
            is_sample_data: false,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn empty_history_returns_default_table() {
        let times = best_posting_times(&[]);
        assert!(!times.derived_from_history);
        assert_eq!(times.slots.len(), 4);
        assert_eq!(times.slots[0].time, "9:00 AM");
        assert!(times.best_weekday.is_none());
    }

    #[test]
    fn hours_rank_by_average_engagement() {
        let posts = vec![
            post(9, 2, 10),
            post(9, 3, 20), // avg 15
            post(19, 2, 40), // avg 40
            post(12, 2, 25), // avg 25
            post(7, 2, 5),  // avg 5, drops out of the top 3
        ];
        let times = best_posting_times(&posts);
        assert!(times.derived_from_history);
        let hours: Vec<&str> = times.slots.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(hours, vec!["19:00", "12:00", "9:00"]);
        assert_eq!(times.slots[0].day, "Evening");
        assert_eq!(times.slots[1].day, "Weekdays");
    }

    #[test]
    fn posts_without_timestamps_fall_back_to_defaults() {
        let mut p = post(9, 2, 10);
        p.timestamp = None;
        let times = best_posting_times(&[p]);
        assert!(!times.derived_from_history);
    }

    #[test]
    fn best_weekday_tracks_engagement_totals() {
        // 2025-06-02 is a Monday, 2025-06-07 a Saturday.
        let posts = vec![post(9, 2, 10), post(9, 7, 50)];
        let times = best_posting_times(&posts);
        assert_eq!(times.best_weekday.as_deref(), Some("Saturday"));
    }

    #[test]
    fn follower_growth_requires_both_periods() {
        let insights = growth_insights(&record(Some(1_100), 0), &record(None, 0));
        assert!(insights.is_empty());
    }

    #[test]
    fn follower_growth_is_one_decimal_percent() {
        let insights = growth_insights(&record(Some(1_100), 0), &record(Some(1_000), 0));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, GrowthKind::FollowerGrowth);
        assert!((insights[0].delta - 10.0).abs() < f64::EPSILON);
        assert!(insights[0].message.contains("grew by 10.0%"));
    }

    #[test]
    fn engagement_decline_is_reported_as_decrease() {
        let insights = growth_insights(&record(None, 80), &record(None, 100));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, GrowthKind::Engagement);
        assert!((insights[0].delta + 20.0).abs() < f64::EPSILON);
        assert!(insights[0].message.contains("decreased by 20.0"));
    }
}
