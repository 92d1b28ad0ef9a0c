//! Bulk contact sync against the HubSpot search API.
//!
//! Pages through `/crm/v3/objects/contacts/search` sequentially and
//! accumulates writes through the store's batched writer so no commit
//! exceeds the per-transaction cap. A 429 answer backs off for a fixed
//! delay and retries the same page, up to a small attempt cap.

use std::time::{Duration, Instant};

use growify_core::SyncSource;
use growify_store::{CrmBatchWriter, CrmStore, CrmWrite};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::CrmError;
use crate::map::map_contact;

const DEFAULT_BASE_URL: &str = "https://api.hubapi.com/";
const SEARCH_PATH: &str = "crm/v3/objects/contacts/search";

const CONTACT_PROPERTIES: &[&str] = &[
    "firstname",
    "lastname",
    "email",
    "phone",
    "company",
    "jobtitle",
    "city",
    "state",
    "country",
    "lifecyclestage",
    "createdate",
    "lastmodifieddate",
    "hs_object_id",
];

/// Paging and backoff knobs; the defaults match production behavior,
/// tests shrink the delays.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub page_size: usize,
    pub rate_limit_backoff: Duration,
    pub max_attempts_per_page: u32,
    pub inter_page_delay: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            rate_limit_backoff: Duration::from_secs(10),
            max_attempts_per_page: 3,
            inter_page_delay: Duration::from_millis(100),
        }
    }
}

/// Outcome statistics for a completed bulk sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    pub total_contacts_synced: usize,
    pub total_pages: usize,
    pub duration_seconds: f64,
    pub average_contacts_per_page: usize,
}

/// Client for the HubSpot CRM REST API.
pub struct HubSpotClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl HubSpotClient {
    /// Creates a client pointed at the production HubSpot API.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self, CrmError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Http`] if the HTTP client cannot be built or
    /// [`CrmError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, CrmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("growify/0.1 (crm-sync)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| CrmError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Sync every HubSpot contact into the store.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::RateLimited`] when a page keeps answering
    /// 429 past the attempt cap, [`CrmError::ApiStatus`] on any other
    /// non-success status, and [`CrmError::Http`] /
    /// [`CrmError::Deserialize`] / [`CrmError::Store`] for transport,
    /// decode, and persistence failures.
    pub async fn bulk_sync_contacts<S: CrmStore>(
        &self,
        store: &S,
        options: &SyncOptions,
    ) -> Result<SyncStats, CrmError> {
        let started = Instant::now();
        let url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|_| CrmError::InvalidBaseUrl(self.base_url.to_string()))?;

        let mut writer = CrmBatchWriter::new(store);
        let mut total_contacts = 0_usize;
        let mut total_pages = 0_usize;
        let mut after: Option<String> = None;

        loop {
            let page = self
                .fetch_page(&url, options, after.as_deref(), total_pages + 1)
                .await?;

            let now = chrono::Utc::now();
            for contact in &page.results {
                let record =
                    map_contact(&contact.properties, &contact.id, SyncSource::InitialBulkSync, now);
                writer.push(CrmWrite::Contact(record)).await?;
                total_contacts += 1;
            }
            total_pages += 1;

            match page.paging.and_then(|p| p.next).map(|n| n.after) {
                Some(cursor) => {
                    after = Some(cursor);
                    tokio::time::sleep(options.inter_page_delay).await;
                }
                None => break,
            }
        }

        writer.flush().await?;

        let duration_seconds = started.elapsed().as_secs_f64();
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let average_contacts_per_page = if total_pages == 0 {
            0
        } else {
            (total_contacts as f64 / total_pages as f64).round() as usize
        };
        let stats = SyncStats {
            total_contacts_synced: total_contacts,
            total_pages,
            duration_seconds: (duration_seconds * 100.0).round() / 100.0,
            average_contacts_per_page,
        };
        info!(
            contacts = stats.total_contacts_synced,
            pages = stats.total_pages,
            "bulk sync completed"
        );
        Ok(stats)
    }

    async fn fetch_page(
        &self,
        url: &Url,
        options: &SyncOptions,
        after: Option<&str>,
        page_number: usize,
    ) -> Result<SearchPage, CrmError> {
        let mut payload = json!({
            "limit": options.page_size,
            "properties": CONTACT_PROPERTIES,
            "sorts": [{"propertyName": "createdate", "direction": "DESCENDING"}],
        });
        if let Some(cursor) = after {
            payload["after"] = Value::String(cursor.to_string());
        }

        let mut attempt = 0_u32;
        loop {
            attempt += 1;
            let response = self
                .client
                .post(url.clone())
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempt >= options.max_attempts_per_page {
                        return Err(CrmError::RateLimited { attempts: attempt });
                    }
                    warn!(
                        page = page_number,
                        attempt,
                        backoff_ms = options.rate_limit_backoff.as_millis() as u64,
                        "rate limited, retrying the same page after backoff"
                    );
                    tokio::time::sleep(options.rate_limit_backoff).await;
                }
                status if status.is_success() => {
                    let body: Value = response.json().await?;
                    return serde_json::from_value(body).map_err(|e| CrmError::Deserialize {
                        context: format!("contacts search page {page_number}"),
                        source: e,
                    });
                }
                status => return Err(CrmError::ApiStatus {
                    status: status.as_u16(),
                }),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
    #[serde(default)]
    properties: Value,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    next: Option<PagingNext>,
}

#[derive(Debug, Deserialize)]
struct PagingNext {
    after: String,
}
