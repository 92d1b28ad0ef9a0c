//! CRM records mirrored from HubSpot objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which path wrote a CRM record last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncSource {
    #[serde(rename = "webhook")]
    Webhook,
    #[serde(rename = "initialBulkSync")]
    InitialBulkSync,
}

/// A HubSpot contact, renamed into our schema. String properties the
/// source omitted are stored as empty strings, not dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub hs_object_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub job_title: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub lifecycle_stage: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub synced_at: DateTime<Utc>,
    pub sync_source: SyncSource,
}

/// A HubSpot deal, renamed into our schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub hs_object_id: String,
    pub deal_name: String,
    pub amount: f64,
    pub deal_stage: String,
    pub pipeline: String,
    pub close_date: Option<DateTime<Utc>>,
    pub deal_type: String,
    pub priority: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub synced_at: DateTime<Utc>,
    pub sync_source: SyncSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_source_uses_source_literals() {
        assert_eq!(
            serde_json::to_string(&SyncSource::Webhook).unwrap(),
            "\"webhook\""
        );
        assert_eq!(
            serde_json::to_string(&SyncSource::InitialBulkSync).unwrap(),
            "\"initialBulkSync\""
        );
    }
}
