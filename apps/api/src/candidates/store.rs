use std::collections::VecDeque;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::candidates::models::{CandidateId, CandidateRecord, CandidateStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Candidate {0} not found")]
    NotFound(CandidateId),

    #[error("Candidate id {0} already exists")]
    DuplicateId(CandidateId),
}

/// In-memory set of candidate records for the lifetime of the process.
///
/// Records are held as `Arc`s ordered newest first. A status change swaps in a
/// new `Arc` under the write lock, so a reader either holds the old record or
/// the fully updated one.
#[derive(Debug, Default)]
pub struct CandidateStore {
    records: RwLock<VecDeque<Arc<CandidateRecord>>>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records already ordered newest first.
    pub fn from_records(records: Vec<CandidateRecord>) -> Result<Self, StoreError> {
        let mut ordered: VecDeque<Arc<CandidateRecord>> = VecDeque::with_capacity(records.len());
        for record in records {
            if ordered.iter().any(|r| r.id == record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            ordered.push_back(Arc::new(record));
        }
        Ok(Self {
            records: RwLock::new(ordered),
        })
    }

    /// Inserts a record at the head of the list.
    pub async fn add_record(
        &self,
        record: CandidateRecord,
    ) -> Result<Arc<CandidateRecord>, StoreError> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.id == record.id) {
            error!(
                candidate_id = %record.id,
                "Integrity violation: candidate id already present in store"
            );
            return Err(StoreError::DuplicateId(record.id));
        }

        let record = Arc::new(record);
        records.push_front(Arc::clone(&record));
        debug!(candidate_id = %record.id, total = records.len(), "Candidate record added");
        Ok(record)
    }

    /// Replaces the status of the record matching `id`. Nothing else changes.
    pub async fn update_status(
        &self,
        id: &CandidateId,
        status: CandidateStatus,
    ) -> Result<Arc<CandidateRecord>, StoreError> {
        let mut records = self.records.write().await;

        let slot = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let mut updated = CandidateRecord::clone(slot);
        updated.status = status;
        *slot = Arc::new(updated);

        debug!(candidate_id = %id, %status, "Candidate status updated");
        Ok(Arc::clone(slot))
    }

    pub async fn get_by_id(&self, id: &CandidateId) -> Result<Arc<CandidateRecord>, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Snapshot of every record, newest first.
    pub async fn list_all(&self) -> Vec<Arc<CandidateRecord>> {
        self.records.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}
