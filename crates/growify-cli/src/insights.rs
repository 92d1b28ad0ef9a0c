//! `insights` command handler.
//!
//! Runs the full normalize -> aggregate -> derive pipeline over a JSON
//! snapshot file, or over the built-in sample data when no file is
//! given, and prints the result to stdout.

use std::path::Path;

use chrono::Utc;
use growify_core::Platform;
use serde::Deserialize;
use serde_json::Value;

/// One entry in a snapshot file: the platform and its raw API payload.
#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    platform: Platform,
    payload: Value,
}

pub(crate) fn run_insights(file: Option<&Path>, cap: Option<usize>) -> anyhow::Result<()> {
    let now = Utc::now();
    let records = match file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
            let entries: Vec<SnapshotEntry> = serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid snapshot in {}: {e}", path.display()))?;
            entries
                .iter()
                .map(|entry| {
                    growify_analytics::normalize("cli", entry.platform, &entry.payload, now)
                })
                .collect::<Vec<_>>()
        }
        None => {
            tracing::info!("no snapshot file given; using built-in sample data");
            Platform::ALL
                .iter()
                .map(|&platform| growify_analytics::sample_record("cli", platform, now))
                .collect()
        }
    };

    let metrics = growify_analytics::aggregate(&records);
    println!("Platforms:   {}", records.len());
    println!("Impressions: {}", metrics.impressions);
    println!("Engagement:  {}", metrics.engagement);
    println!("Posts:       {}", metrics.posts);
    println!("Rate:        {}%", metrics.engagement_rate);
    if !metrics.followers_breakdown.is_empty() {
        println!("Followers:   {}", metrics.followers_breakdown);
    }
    println!();

    let insights = growify_analytics::derive_insights(&records, cap);
    let header = format!("{:<4}{:<16}TEXT", "PRI", "CATEGORY");
    println!("{header}");
    for insight in &insights {
        let category = serde_json::to_value(insight.category)?
            .as_str()
            .unwrap_or_default()
            .to_string();
        println!("{:<4}{:<16}{}", insight.priority, category, insight.text);
    }

    Ok(())
}
