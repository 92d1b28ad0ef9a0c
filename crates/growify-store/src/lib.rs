//! Persistence layer for Growify.
//!
//! The store traits are the only seam between the pure analytics/CRM
//! logic and storage. The in-memory implementations here provide
//! last-write-wins upserts and snapshot broadcasts; they are the
//! backing store for the server and for tests.

pub mod analytics;
pub mod content;
pub mod crm;

use thiserror::Error;

pub use analytics::{read_or_empty, AnalyticsStore, MemoryAnalyticsStore};
pub use content::MemoryContentStore;
pub use crm::{CrmBatchWriter, CrmStore, CrmWrite, MemoryCrmStore, STORE_BATCH_LIMIT};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("batch of {0} writes exceeds the per-commit limit of {STORE_BATCH_LIMIT}")]
    BatchTooLarge(usize),
}
