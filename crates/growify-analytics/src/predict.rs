//! Heuristic engagement scoring for draft content.
//!
//! The score starts at a neutral base and earns fixed bonuses for
//! platform-appropriate caption length, hashtag count, light emoji use,
//! and a peak-hour posting time. A small random jitter keeps repeated
//! predictions from looking artificially exact; [`base_engagement_score`]
//! is the deterministic part.

use chrono::Timelike;
use growify_core::{DraftPost, Platform};
use rand::Rng;

const BASE_SCORE: i32 = 50;
const CAPTION_BONUS: i32 = 10;
const HASHTAG_BONUS: i32 = 10;
const EMOJI_BONUS: i32 = 5;
const PEAK_HOUR_BONUS: i32 = 15;
const JITTER: i32 = 5;

/// Deterministic score component, before jitter. Always in `0..=100`.
#[must_use]
pub fn base_engagement_score(draft: &DraftPost) -> u8 {
    let mut score = BASE_SCORE;

    let caption_length = draft.caption.chars().count();
    let caption_fits = match draft.platform {
        Platform::Instagram => (100..=300).contains(&caption_length),
        Platform::Twitter => caption_length <= 280,
        _ => false,
    };
    if caption_fits {
        score += CAPTION_BONUS;
    }

    let hashtag_count = draft.hashtags.len();
    let hashtags_fit = match draft.platform {
        Platform::Instagram => (5..=15).contains(&hashtag_count),
        Platform::Twitter => (1..=3).contains(&hashtag_count),
        _ => false,
    };
    if hashtags_fit {
        score += HASHTAG_BONUS;
    }

    let emoji_count = draft
        .caption
        .chars()
        .filter(|c| ('\u{1F600}'..='\u{1F64F}').contains(c))
        .count();
    if (1..=5).contains(&emoji_count) {
        score += EMOJI_BONUS;
    }

    let hour = draft.posting_time.hour();
    if (9..=12).contains(&hour) || (18..=21).contains(&hour) {
        score += PEAK_HOUR_BONUS;
    }

    clamp_score(score)
}

/// Predicted engagement score in `0..=100`, jittered by up to
/// [`JITTER`] points either way.
#[must_use]
pub fn predict_engagement_score<R: Rng>(draft: &DraftPost, rng: &mut R) -> u8 {
    let jitter = rng.random_range(-JITTER..=JITTER);
    clamp_score(i32::from(base_engagement_score(draft)) + jitter)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}
