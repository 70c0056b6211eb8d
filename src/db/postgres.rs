use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use super::{
    models::StoredRecord,
    repository::{RecordRepository, RepositoryError},
};
use crate::records::SensorRecord;

/// Postgres-backed [`RecordRepository`] writing to `sensor_records`.
#[derive(Debug, Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn save(&self, record: SensorRecord) -> Result<SensorRecord, RepositoryError> {
        let row = sqlx::query_as::<_, StoredRecord>(
            r#"
            INSERT INTO sensor_records
                (id, device_id, owner, stream_id, stream_unit,
                 stream_value_time, sensor_value, sensor_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, device_id, owner, stream_id, stream_unit,
                      stream_value_time, sensor_value, sensor_type, received_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.device_id)
        .bind(&record.owner)
        .bind(&record.stream_id)
        .bind(&record.stream_unit)
        .bind(record.stream_value_time)
        .bind(record.sensor_value)
        .bind(record.sensor_type)
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| {
            error!(device_id = %record.device_id, error = %e, "Failed to insert sensor record")
        })?;

        debug!(id = %row.id, received_at = %row.received_at, "Sensor record stored");
        Ok(row.into())
    }
}
