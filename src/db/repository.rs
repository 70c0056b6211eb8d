use async_trait::async_trait;
use thiserror::Error;

use crate::records::SensorRecord;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable store for converted readings.
///
/// `Ok` means the record was persisted; callers treat any `Err` as an opaque
/// storage failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Persist one record and hand back what was stored.
    async fn save(&self, record: SensorRecord) -> Result<SensorRecord, RepositoryError>;
}
