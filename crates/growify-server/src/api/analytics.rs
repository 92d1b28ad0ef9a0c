//! Analytics read and sync-write endpoints.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use growify_analytics::{aggregate, derive_insights, normalize, PROFILE_INSIGHT_CAP};
use growify_core::Platform;
use growify_store::{read_or_empty, AnalyticsStore};
use serde::Serialize;
use serde_json::Value;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    metrics: growify_analytics::AggregatedMetrics,
    insights: Vec<growify_analytics::Insight>,
    platforms_connected: usize,
}

/// `GET /api/v1/users/{user_id}/analytics`
///
/// The read is timeout-bounded: a slow store resolves to the empty
/// state (zero metrics, getting-started insights), never an error.
pub async fn user_analytics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let deadline = Duration::from_millis(state.config.read_timeout_ms);
    let records = read_or_empty(
        "user analytics",
        deadline,
        state.analytics.records_for_user(&user_id),
    )
    .await;

    let data = UserAnalytics {
        metrics: aggregate(&records),
        insights: derive_insights(&records, Some(PROFILE_INSIGHT_CAP)),
        platforms_connected: records.len(),
    };
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `PUT /api/v1/users/{user_id}/analytics/{platform}`
///
/// Accepts the platform's raw API payload, normalizes it, and upserts
/// the resulting record. This is the sync write path.
pub async fn upsert_platform_analytics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((user_id, platform)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let platform: Platform = platform.parse().map_err(|_| {
        ApiError::new(
            req_id.0.clone(),
            "bad_request",
            format!("unknown platform: {platform}"),
        )
    })?;

    let record = normalize(&user_id, platform, &payload, Utc::now());
    tracing::info!(
        user = %user_id,
        platform = %platform,
        engagement = record.engagement,
        impressions = record.impressions,
        "normalized platform payload"
    );
    state.analytics.upsert_record(record.clone()).await;

    Ok(Json(ApiResponse {
        data: record,
        meta: ResponseMeta::new(req_id.0),
    }))
}
