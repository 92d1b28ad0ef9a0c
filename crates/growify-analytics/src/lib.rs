//! Analytics aggregation and insight derivation for Growify.
//!
//! Normalizes heterogeneous per-platform payloads into the unified
//! analytics record, merges a user's records into totals, derives
//! ranked recommendations, scores draft content, and analyzes posting
//! times. Every function here is a pure computation over already-fetched
//! data; persistence and network I/O belong to the callers.

pub mod aggregate;
pub mod insights;
pub mod normalize;
pub mod predict;
pub mod sample;
pub mod times;
pub mod types;

pub use aggregate::aggregate;
pub use insights::{derive_insights, PROFILE_INSIGHT_CAP};
pub use normalize::{normalize, normalize_with_rng};
pub use predict::{base_engagement_score, predict_engagement_score};
pub use sample::sample_record;
pub use times::{best_posting_times, growth_insights, GrowthInsight, PostingTimes};
pub use types::{AggregatedMetrics, Insight, InsightCategory};
