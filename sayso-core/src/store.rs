//! Record store contract and the in-memory implementation
//!
//! Documents are opaque to the store: inserts never inspect the payload, ids
//! are store-generated, and records are immutable once written. No
//! transactional semantics — writes are independent and reads see whatever
//! snapshot the store returns at call time.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::Result;
use crate::types::{AssessmentRecord, RecordId};

/// Persistence contract for assessment records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a payload for a user, returning the generated id.
    async fn insert(&self, user_id: &str, raw_payload: &str) -> Result<RecordId>;

    /// Look up one record by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<AssessmentRecord>>;

    /// All records belonging to a user.
    ///
    /// Order is store-defined; callers must not rely on it unless the
    /// concrete store documents one.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<AssessmentRecord>>;
}

/// In-memory record store backed by a `tokio` RwLock.
///
/// Returns a user's records in insertion order. Suitable for tests and
/// single-process deployments; a document-store client plugs in behind the
/// same trait.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<AssessmentRecord>>,
}

impl MemoryRecordStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all users.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, user_id: &str, raw_payload: &str) -> Result<RecordId> {
        let record = AssessmentRecord {
            // UUIDv7 embeds a timestamp, so ids sort in creation order.
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            raw_payload: raw_payload.to_string(),
            ingested_at: Utc::now(),
        };
        let id = record.id.clone();
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AssessmentRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<AssessmentRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}
