//! `predict` command handler.

use chrono::Utc;
use growify_core::{DraftPost, Platform};
use rand::{rngs::SmallRng, SeedableRng};

pub(crate) fn run_predict(
    caption: &str,
    hashtags: Vec<String>,
    platform: Platform,
    hour: u32,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    if hour > 23 {
        anyhow::bail!("--hour must be 0-23, got {hour}");
    }
    // The predictor only reads the hour, so any date works.
    let posting_time = Utc::now()
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid hour: {hour}"))?
        .and_utc();

    let draft = DraftPost {
        caption: caption.to_string(),
        hashtags,
        platform,
        posting_time,
    };

    let base = growify_analytics::base_engagement_score(&draft);
    let score = match seed {
        Some(seed) => {
            let mut rng = SmallRng::seed_from_u64(seed);
            growify_analytics::predict_engagement_score(&draft, &mut rng)
        }
        None => growify_analytics::predict_engagement_score(&draft, &mut rand::rng()),
    };

    println!("Platform:   {}", draft.platform.display_name());
    println!("Base score: {base}");
    println!("Predicted:  {score}");

    Ok(())
}
