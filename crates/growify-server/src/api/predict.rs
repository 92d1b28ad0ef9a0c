//! Engagement prediction endpoint.

use axum::{response::IntoResponse, Extension, Json};
use growify_analytics::{base_engagement_score, predict_engagement_score};
use growify_core::DraftPost;
use serde::Serialize;

use super::{ApiResponse, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    score: u8,
    base_score: u8,
}

/// `POST /api/v1/predict`
pub async fn predict(
    Extension(req_id): Extension<RequestId>,
    Json(draft): Json<DraftPost>,
) -> impl IntoResponse {
    let prediction = Prediction {
        score: predict_engagement_score(&draft, &mut rand::rng()),
        base_score: base_engagement_score(&draft),
    };
    Json(ApiResponse {
        data: prediction,
        meta: ResponseMeta::new(req_id.0),
    })
}
