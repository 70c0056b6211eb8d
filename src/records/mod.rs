pub(crate) mod lenient;
pub mod translator;

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of sensor kinds relayed by the Proximus-Enco gateway.
///
/// The gateway does not send a type discriminator. Each variant carries the
/// lowercase token used to recognise it inside `streamDescription`, and the
/// JSON key under which its value is delivered. Declaration order is the
/// match order: when a description contains several tokens, the earlier
/// variant wins.
///
/// Serialised by variant name (`"Light"`); stored as the snake_case
/// `sensor_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sensor_type", rename_all = "snake_case")]
pub enum SensorType {
    Light,
    Temperature,
    Humidity,
    Pressure,
    Battery,
}

impl SensorType {
    /// All variants, in match order.
    pub const ALL: [SensorType; 5] = [
        SensorType::Light,
        SensorType::Temperature,
        SensorType::Humidity,
        SensorType::Pressure,
        SensorType::Battery,
    ];

    /// Lowercase substring that identifies this type in a stream description.
    pub fn match_token(self) -> &'static str {
        match self {
            SensorType::Light => "light",
            SensorType::Temperature => "temperature",
            SensorType::Humidity => "humidity",
            SensorType::Pressure => "pressure",
            SensorType::Battery => "battery",
        }
    }

    /// Key of the upstream JSON field holding this type's reading.
    pub fn value_field_key(self) -> &'static str {
        match self {
            SensorType::Light => "lightValue",
            SensorType::Temperature => "temperatureValue",
            SensorType::Humidity => "humidityValue",
            SensorType::Pressure => "pressureValue",
            SensorType::Battery => "batteryValue",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SensorType::Light => "Light",
            SensorType::Temperature => "Temperature",
            SensorType::Humidity => "Humidity",
            SensorType::Pressure => "Pressure",
            SensorType::Battery => "Battery",
        };
        f.write_str(s)
    }
}

/// One sensor observation.
///
/// Carries no validation of its own; the translator and the endpoint decide
/// what is acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRecord {
    pub device_id: String,
    pub owner: String,
    #[serde(alias = "stream_id")]
    pub stream_id: String,
    pub stream_unit: String,
    /// Observation time, epoch milliseconds.
    pub stream_value_time: i64,
    pub sensor_value: f64,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
}

impl SensorRecord {
    /// Compact form for log lines: type and value only.
    pub fn summary(&self) -> String {
        format!(
            "Record{{Type: {}, value: {:?}}}",
            self.sensor_type, self.sensor_value
        )
    }
}

impl fmt::Display for SensorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record{{deviceId={}, owner={}, streamId={}, streamUnit={}, \
             streamValueTime={}, sensorValue={:?}, type={}}}",
            self.device_id,
            self.owner,
            self.stream_id,
            self.stream_unit,
            self.stream_value_time,
            self.sensor_value,
            self.sensor_type,
        )
    }
}
