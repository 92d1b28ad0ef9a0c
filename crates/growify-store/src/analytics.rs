//! Analytics record storage with snapshot broadcasts.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use growify_core::PlatformAnalyticsRecord;
use tokio::sync::{broadcast, RwLock};
use tracing::warn;

const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

/// Storage contract for per-(user, platform) analytics records.
pub trait AnalyticsStore: Send + Sync {
    /// All records for a user, in platform order.
    fn records_for_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Vec<PlatformAnalyticsRecord>> + Send;

    /// Insert or replace the record for `(record.user_id,
    /// record.platform)`; last write wins. Subscribers of that user
    /// receive a fresh snapshot.
    fn upsert_record(&self, record: PlatformAnalyticsRecord) -> impl Future<Output = ()> + Send;

    /// Subscribe to full snapshots of a user's records. Every upsert
    /// sends a new snapshot; there is no debouncing.
    fn subscribe(
        &self,
        user_id: &str,
    ) -> impl Future<Output = broadcast::Receiver<Vec<PlatformAnalyticsRecord>>> + Send;
}

/// In-memory [`AnalyticsStore`].
#[derive(Debug, Default)]
pub struct MemoryAnalyticsStore {
    records: RwLock<HashMap<String, PlatformAnalyticsRecord>>,
    senders: RwLock<HashMap<String, broadcast::Sender<Vec<PlatformAnalyticsRecord>>>>,
}

impl MemoryAnalyticsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn snapshot(&self, user_id: &str) -> Vec<PlatformAnalyticsRecord> {
        let records = self.records.read().await;
        let mut snapshot: Vec<PlatformAnalyticsRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        snapshot.sort_by_key(|r| r.platform);
        snapshot
    }
}

impl AnalyticsStore for MemoryAnalyticsStore {
    async fn records_for_user(&self, user_id: &str) -> Vec<PlatformAnalyticsRecord> {
        self.snapshot(user_id).await
    }

    async fn upsert_record(&self, record: PlatformAnalyticsRecord) {
        let user_id = record.user_id.clone();
        {
            let mut records = self.records.write().await;
            records.insert(record.key(), record);
        }

        let senders = self.senders.read().await;
        if let Some(sender) = senders.get(&user_id) {
            // A send only fails when every receiver is gone; stale
            // senders are cleaned up on the next subscribe.
            let _ = sender.send(self.snapshot(&user_id).await);
        }
    }

    async fn subscribe(&self, user_id: &str) -> broadcast::Receiver<Vec<PlatformAnalyticsRecord>> {
        let mut senders = self.senders.write().await;
        senders
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

/// Race a read against a deadline. A slow query resolves to an empty
/// result so interactive callers render the empty state instead of
/// hanging.
pub async fn read_or_empty<T, F>(label: &str, deadline: Duration, query: F) -> Vec<T>
where
    F: Future<Output = Vec<T>>,
{
    match tokio::time::timeout(deadline, query).await {
        Ok(result) => result,
        Err(_) => {
            warn!(query = label, timeout_ms = deadline.as_millis() as u64, "read timed out, returning empty result");
            Vec::new()
        }
    }
}
