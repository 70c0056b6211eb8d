use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::records::{SensorRecord, SensorType};

/// One row of `sensor_records`.
#[derive(Debug, Clone, FromRow)]
pub struct StoredRecord {
    pub id: Uuid,
    pub device_id: String,
    pub owner: String,
    pub stream_id: String,
    pub stream_unit: String,
    pub stream_value_time: i64,
    pub sensor_value: f64,
    pub sensor_type: SensorType,
    /// Set by the database on insert.
    pub received_at: DateTime<Utc>,
}

impl From<StoredRecord> for SensorRecord {
    fn from(row: StoredRecord) -> Self {
        Self {
            device_id: row.device_id,
            owner: row.owner,
            stream_id: row.stream_id,
            stream_unit: row.stream_unit,
            stream_value_time: row.stream_value_time,
            sensor_value: row.sensor_value,
            sensor_type: row.sensor_type,
        }
    }
}
