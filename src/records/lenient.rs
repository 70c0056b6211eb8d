//! Forgiving deserializers for pass-through fields.
//!
//! The gateway is loose about scalar types: identifiers may arrive as
//! numbers or `null`, timestamps as integral floats or numeric strings.

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// Any JSON scalar as text; `null` becomes `""`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected a scalar, got {other}"))),
    }
}

/// Epoch milliseconds from an integer, an integral float or a numeric
/// string; `null` becomes `None`.
pub fn epoch_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let millis = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };
    millis
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected epoch milliseconds, got {value}")))
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then_some(f as i64)
}
