use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::{RecordRepository, RepositoryError};
use crate::records::SensorRecord;

/// Process-local [`RecordRepository`], for development without a database.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryRecordRepository {
    inner: Arc<RwLock<Vec<SensorRecord>>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, oldest first.
    pub async fn all(&self) -> Vec<SensorRecord> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn save(&self, record: SensorRecord) -> Result<SensorRecord, RepositoryError> {
        self.inner.write().await.push(record.clone());
        Ok(record)
    }
}
