//! CRM record storage and the batched writer.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use growify_core::{ContactRecord, DealRecord};
use tokio::sync::RwLock;
use tracing::debug;

use crate::StoreError;

/// Per-commit write cap. Larger batches must be split by the caller;
/// [`CrmBatchWriter`] does this automatically.
pub const STORE_BATCH_LIMIT: usize = 500;

/// Storage contract for mirrored CRM objects.
pub trait CrmStore: Send + Sync {
    /// Merge-upsert a contact keyed by its HubSpot object id.
    fn upsert_contact(&self, contact: ContactRecord) -> impl Future<Output = ()> + Send;

    /// Merge-upsert a deal keyed by its HubSpot object id.
    fn upsert_deal(&self, deal: DealRecord) -> impl Future<Output = ()> + Send;

    /// Commit up to [`STORE_BATCH_LIMIT`] contacts in one transaction.
    fn commit_contacts(
        &self,
        batch: Vec<ContactRecord>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn contact_count(&self) -> impl Future<Output = usize> + Send;

    fn deal_count(&self) -> impl Future<Output = usize> + Send;

    /// `synced_at` of the most recently synced contact.
    fn latest_contact_sync(&self) -> impl Future<Output = Option<DateTime<Utc>>> + Send;

    /// `synced_at` of the most recently synced deal.
    fn latest_deal_sync(&self) -> impl Future<Output = Option<DateTime<Utc>>> + Send;
}

/// In-memory [`CrmStore`].
#[derive(Debug, Default)]
pub struct MemoryCrmStore {
    contacts: RwLock<HashMap<String, ContactRecord>>,
    deals: RwLock<HashMap<String, DealRecord>>,
}

impl MemoryCrmStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contact(&self, hs_object_id: &str) -> Option<ContactRecord> {
        self.contacts.read().await.get(hs_object_id).cloned()
    }

    pub async fn deal(&self, hs_object_id: &str) -> Option<DealRecord> {
        self.deals.read().await.get(hs_object_id).cloned()
    }
}

impl CrmStore for MemoryCrmStore {
    async fn upsert_contact(&self, contact: ContactRecord) {
        let mut contacts = self.contacts.write().await;
        contacts.insert(contact.hs_object_id.clone(), contact);
    }

    async fn upsert_deal(&self, deal: DealRecord) {
        let mut deals = self.deals.write().await;
        deals.insert(deal.hs_object_id.clone(), deal);
    }

    async fn commit_contacts(&self, batch: Vec<ContactRecord>) -> Result<(), StoreError> {
        if batch.len() > STORE_BATCH_LIMIT {
            return Err(StoreError::BatchTooLarge(batch.len()));
        }
        let count = batch.len();
        let mut contacts = self.contacts.write().await;
        for contact in batch {
            contacts.insert(contact.hs_object_id.clone(), contact);
        }
        debug!(count, "committed contact batch");
        Ok(())
    }

    async fn contact_count(&self) -> usize {
        self.contacts.read().await.len()
    }

    async fn deal_count(&self) -> usize {
        self.deals.read().await.len()
    }

    async fn latest_contact_sync(&self) -> Option<DateTime<Utc>> {
        self.contacts
            .read()
            .await
            .values()
            .map(|c| c.synced_at)
            .max()
    }

    async fn latest_deal_sync(&self) -> Option<DateTime<Utc>> {
        self.deals.read().await.values().map(|d| d.synced_at).max()
    }
}

/// A pending CRM write.
#[derive(Debug, Clone)]
pub enum CrmWrite {
    Contact(ContactRecord),
    Deal(DealRecord),
}

/// Accumulates writes and flushes whenever the buffer reaches the
/// per-commit cap. Call [`CrmBatchWriter::flush`] at the end to commit
/// the remainder.
pub struct CrmBatchWriter<'a, S: CrmStore> {
    store: &'a S,
    pending: Vec<CrmWrite>,
    committed: usize,
}

impl<'a, S: CrmStore> CrmBatchWriter<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            pending: Vec::new(),
            committed: 0,
        }
    }

    /// Buffer one write, flushing first if the buffer is full.
    pub async fn push(&mut self, write: CrmWrite) -> Result<(), StoreError> {
        if self.pending.len() >= STORE_BATCH_LIMIT {
            self.flush().await?;
        }
        self.pending.push(write);
        Ok(())
    }

    /// Commit everything still buffered.
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut contacts = Vec::new();
        for write in self.pending.drain(..) {
            match write {
                CrmWrite::Contact(contact) => contacts.push(contact),
                CrmWrite::Deal(deal) => {
                    self.committed += 1;
                    self.store.upsert_deal(deal).await;
                }
            }
        }
        if !contacts.is_empty() {
            self.committed += contacts.len();
            self.store.commit_contacts(contacts).await?;
        }
        Ok(())
    }

    /// Total writes committed so far.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growify_core::SyncSource;

    fn contact(id: &str) -> ContactRecord {
        let now = Utc::now();
        ContactRecord {
            hs_object_id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: format!("{id}@example.com"),
            phone: String::new(),
            company: String::new(),
            job_title: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            lifecycle_stage: "lead".to_string(),
            created_at: now,
            last_modified_at: now,
            synced_at: now,
            sync_source: SyncSource::Webhook,
        }
    }

    fn deal(id: &str) -> DealRecord {
        let now = Utc::now();
        DealRecord {
            hs_object_id: id.to_string(),
            deal_name: "Annual plan".to_string(),
            amount: 1200.0,
            deal_stage: "qualified".to_string(),
            pipeline: "default".to_string(),
            close_date: None,
            deal_type: String::new(),
            priority: String::new(),
            description: String::new(),
            created_at: now,
            last_modified_at: now,
            synced_at: now,
            sync_source: SyncSource::Webhook,
        }
    }

    #[tokio::test]
    async fn contact_upsert_replaces_by_object_id() {
        let store = MemoryCrmStore::new();
        store.upsert_contact(contact("1")).await;
        let mut updated = contact("1");
        updated.email = "new@example.com".to_string();
        store.upsert_contact(updated).await;

        assert_eq!(store.contact_count().await, 1);
        assert_eq!(
            store.contact("1").await.unwrap().email,
            "new@example.com"
        );
    }

    #[tokio::test]
    async fn oversized_commit_is_rejected() {
        let store = MemoryCrmStore::new();
        let batch: Vec<ContactRecord> = (0..=STORE_BATCH_LIMIT)
            .map(|i| contact(&i.to_string()))
            .collect();
        let err = store.commit_contacts(batch).await.unwrap_err();
        assert!(matches!(err, StoreError::BatchTooLarge(n) if n == STORE_BATCH_LIMIT + 1));
    }

    #[tokio::test]
    async fn batch_writer_flushes_at_the_cap() {
        let store = MemoryCrmStore::new();
        let mut writer = CrmBatchWriter::new(&store);
        for i in 0..(STORE_BATCH_LIMIT + 50) {
            writer
                .push(CrmWrite::Contact(contact(&i.to_string())))
                .await
                .unwrap();
        }
        writer.flush().await.unwrap();

        assert_eq!(writer.committed(), STORE_BATCH_LIMIT + 50);
        assert_eq!(store.contact_count().await, STORE_BATCH_LIMIT + 50);
    }

    #[tokio::test]
    async fn latest_sync_tracks_the_newest_stamp() {
        let store = MemoryCrmStore::new();
        assert!(store.latest_contact_sync().await.is_none());

        let mut old = contact("1");
        old.synced_at = Utc::now() - chrono::Duration::hours(2);
        let recent = contact("2");
        let expected = recent.synced_at;
        store.upsert_contact(old).await;
        store.upsert_contact(recent).await;

        assert_eq!(store.latest_contact_sync().await, Some(expected));
        store.upsert_deal(deal("d1")).await;
        assert_eq!(store.deal_count().await, 1);
        assert!(store.latest_deal_sync().await.is_some());
    }
}
