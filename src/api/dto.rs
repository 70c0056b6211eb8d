use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::records::{lenient, SensorRecord, SensorType};

/// Public rendering of a record. Identifier, owner and unit fields are not
/// exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    /// Observation time, epoch milliseconds.
    pub stream_value_time: i64,
    pub sensor_value: f64,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
}

impl RecordDto {
    /// XML rendering rooted at `<Record>`, one element per field.
    pub fn to_xml(&self) -> String {
        // Numbers and variant names never need escaping.
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Record>\
             <streamValueTime>{}</streamValueTime>\
             <sensorValue>{:?}</sensorValue>\
             <type>{}</type>\
             </Record>",
            self.stream_value_time, self.sensor_value, self.sensor_type
        )
    }
}

impl From<SensorRecord> for RecordDto {
    fn from(r: SensorRecord) -> Self {
        Self {
            stream_value_time: r.stream_value_time,
            sensor_value: r.sensor_value,
            sensor_type: r.sensor_type,
        }
    }
}

/// Request body for `POST /service/testing`: a record supplied directly,
/// every field optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TestingRecordRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub device_id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub owner: String,
    #[serde(alias = "stream_id", deserialize_with = "lenient::text")]
    pub stream_id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub stream_unit: String,
    /// Epoch milliseconds; `0` when absent.
    #[serde(deserialize_with = "lenient::epoch_millis")]
    pub stream_value_time: Option<i64>,
    pub sensor_value: f64,
    /// Required in practice: a request without it is rejected.
    #[serde(rename = "type")]
    pub sensor_type: Option<SensorType>,
}

impl TestingRecordRequest {
    /// The record to store, or `None` when no sensor type was supplied.
    pub fn into_record(self) -> Option<SensorRecord> {
        Some(SensorRecord {
            sensor_type: self.sensor_type?,
            device_id: self.device_id,
            owner: self.owner,
            stream_id: self.stream_id,
            stream_unit: self.stream_unit,
            stream_value_time: self.stream_value_time.unwrap_or_default(),
            sensor_value: self.sensor_value,
        })
    }
}
