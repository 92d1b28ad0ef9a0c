//! HubSpot webhook, bulk sync, and status endpoints.

use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use growify_crm::{process_events, validate_signature, HubSpotClient, SyncOptions, WebhookEvent};
use growify_store::CrmStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

const SIGNATURE_HEADER: &str = "x-hubspot-signature";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookOutcome {
    success: bool,
    events_processed: usize,
    results: Vec<growify_crm::EventResult>,
}

/// `POST /api/v1/hubspot/webhook`
///
/// The signature covers the raw body, so the body is taken as bytes
/// and parsed after validation. A single event object and an array of
/// events are both accepted.
pub async fn webhook(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    if !validate_signature(state.config.webhook_secret.as_deref(), &body, signature) {
        tracing::warn!("webhook rejected: invalid signature");
        return Err(ApiError::new(
            req_id.0,
            "invalid_signature",
            "Invalid signature",
        ));
    }

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        ApiError::new(req_id.0.clone(), "bad_request", format!("invalid JSON body: {e}"))
    })?;
    let raw_events = match payload {
        Value::Array(items) => items,
        other => vec![other],
    };
    let events: Vec<WebhookEvent> = raw_events
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect();

    tracing::info!(count = events.len(), "processing webhook events");
    let results = process_events(state.crm.as_ref(), &events, Utc::now()).await;

    Ok(Json(ApiResponse {
        data: WebhookOutcome {
            success: true,
            events_processed: events.len(),
            results,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    #[serde(default)]
    hubspot_api_key: Option<String>,
}

/// `POST /api/v1/hubspot/sync`
///
/// One-time bulk import of HubSpot contacts. The API key comes from
/// the request body, falling back to the configured key.
pub async fn bulk_sync(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SyncRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let api_key = request
        .hubspot_api_key
        .or_else(|| state.config.hubspot_api_key.clone())
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "bad_request",
                "Missing required parameter: hubspotApiKey",
            )
        })?;

    let client = HubSpotClient::with_base_url(&api_key, &state.config.hubspot_base_url)
        .map_err(|e| map_crm_error(req_id.0.clone(), &e))?;
    let options = SyncOptions {
        page_size: state.config.sync_page_size,
        rate_limit_backoff: Duration::from_secs(state.config.rate_limit_backoff_secs),
        max_attempts_per_page: state.config.sync_max_retries,
        ..SyncOptions::default()
    };

    let stats = client
        .bulk_sync_contacts(state.crm.as_ref(), &options)
        .await
        .map_err(|e| map_crm_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: stats,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStatus {
    count: usize,
    last_synced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct HubSpotStatus {
    contacts: CollectionStatus,
    deals: CollectionStatus,
}

/// `GET /api/v1/hubspot/status`
pub async fn status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let crm = state.crm.as_ref();
    let data = HubSpotStatus {
        contacts: CollectionStatus {
            count: crm.contact_count().await,
            last_synced_at: crm.latest_contact_sync().await,
        },
        deals: CollectionStatus {
            count: crm.deal_count().await,
            last_synced_at: crm.latest_deal_sync().await,
        },
    };
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

fn map_crm_error(request_id: String, error: &growify_crm::CrmError) -> ApiError {
    tracing::error!(error = %error, "hubspot sync failed");
    let code = match error {
        growify_crm::CrmError::RateLimited { .. } => "rate_limited",
        _ => "internal_error",
    };
    ApiError::new(request_id, code, error.to_string())
}
