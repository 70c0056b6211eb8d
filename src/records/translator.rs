use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use super::{lenient, SensorRecord, SensorType};

const DESCRIPTION_KEY: &str = "streamDescription";
const TIMESTAMP_KEY: &str = "streamValueTime";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("payload is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("field {0} must be text, not a JSON array or object")]
    NotText(String),

    #[error("no sensor type matches stream description {description:?}")]
    UnresolvedType { description: String },

    #[error("field {field} is not a number: {raw}")]
    ValueFormat { field: String, raw: String },
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Directly-named fields of a Proximus-Enco payload. Type and value are not
/// here: their keys depend on the description text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProximusPayload {
    #[serde(deserialize_with = "lenient::text")]
    device_id: String,
    #[serde(deserialize_with = "lenient::text")]
    owner: String,
    #[serde(alias = "stream_id", deserialize_with = "lenient::text")]
    stream_id: String,
    #[serde(deserialize_with = "lenient::text")]
    stream_unit: String,
    #[serde(deserialize_with = "lenient::epoch_millis")]
    stream_value_time: Option<i64>,
}

/// Converts between gateway JSON and [`SensorRecord`].
///
/// Holds no state, so one value can be copied into every request handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadTranslator;

impl PayloadTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw gateway payload.
    ///
    /// Two passes over the same document: a typed pass for the fixed fields,
    /// then a walk of the generic object to resolve the sensor type from
    /// `streamDescription` and read the value under that type's key.
    pub fn parse_reading(&self, raw: &str) -> Result<SensorRecord> {
        info!("Converting gateway payload");
        debug!(payload = %raw, "Raw gateway payload");

        let document: Value = serde_json::from_str(raw)?;
        let Value::Object(object) = &document else {
            return Err(TranslateError::NotAnObject);
        };
        let fixed = ProximusPayload::deserialize(&document)?;

        let description = description(object)?;
        debug!(description = %description, "Resolving sensor type");

        let sensor_type = resolve_type(&description)?;
        let sensor_value = resolve_value(object, sensor_type)?;
        let stream_value_time = fixed
            .stream_value_time
            .ok_or_else(|| TranslateError::MissingField(TIMESTAMP_KEY.to_owned()))?;

        let record = SensorRecord {
            device_id: fixed.device_id,
            owner: fixed.owner,
            stream_id: fixed.stream_id,
            stream_unit: fixed.stream_unit,
            stream_value_time,
            sensor_value,
            sensor_type,
        };

        info!(record = %record.summary(), "Gateway payload converted");
        debug!(record = %record, "Converted record");
        Ok(record)
    }

    /// Serialise every field of `record` under its model name.
    pub fn render_reading(&self, record: &SensorRecord) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }
}

/// `streamDescription` as text. Numbers and booleans are matched by their
/// JSON text; `null` counts as absent.
fn description(object: &Map<String, Value>) -> Result<String> {
    match object.get(DESCRIPTION_KEY) {
        None | Some(Value::Null) => Err(TranslateError::MissingField(DESCRIPTION_KEY.to_owned())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(_) => Err(TranslateError::NotText(DESCRIPTION_KEY.to_owned())),
    }
}

/// First variant, in declared order, whose token occurs in `description`
/// (case-insensitive).
pub fn resolve_type(description: &str) -> Result<SensorType> {
    let lowered = description.to_lowercase();
    SensorType::ALL
        .into_iter()
        .find(|t| lowered.contains(t.match_token()))
        .inspect(|t| debug!(sensor_type = %t, "Sensor type resolved"))
        .ok_or_else(|| TranslateError::UnresolvedType {
            description: description.to_owned(),
        })
}

/// Read the value stored under `sensor_type`'s key. The gateway sends it as a
/// numeric string; a bare JSON number is accepted too.
fn resolve_value(object: &Map<String, Value>, sensor_type: SensorType) -> Result<f64> {
    let key = sensor_type.value_field_key();
    let format_err = |raw: String| TranslateError::ValueFormat {
        field: key.to_owned(),
        raw,
    };

    let value = match object.get(key) {
        None => return Err(TranslateError::MissingField(key.to_owned())),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| format_err(s.clone()))?,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| format_err(n.to_string()))?,
        Some(other) => return Err(format_err(other.to_string())),
    };

    // serde_json cannot represent NaN or infinities
    if !value.is_finite() {
        return Err(format_err(value.to_string()));
    }
    Ok(value)
}
