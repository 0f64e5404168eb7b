//! Helpers for loosely-typed JSON field values

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Whether a JSON value counts as "present" for required-field checks
///
/// Everything is truthy except `null`, `false`, `0`, `NaN` and `""`.
/// Arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read a number as a whole, non-negative count
///
/// Accepts integral floats such as `10.0`, as JSON does not distinguish them.
pub fn as_count(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return (n >= 0).then_some(n);
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// `serialize_with` adapter writing `12.0` as `12`
pub fn compact_f64<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// `serialize_with` adapter for optional numbers
pub fn compact_opt_f64<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => compact_f64(v, serializer),
        None => serializer.serialize_none(),
    }
}

/// `deserialize_with` adapter keeping an explicit `null` apart from an absent key
///
/// Pair it with `#[serde(default)]`: absent is `None`, `null` is `Some(None)`.
pub fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Current time truncated to the millisecond, as stamped on new records
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `serialize_with` adapter writing `2024-05-01T10:00:00.000Z`
pub fn iso_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Render a value for text comparison: strings as-is, everything else as JSON
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tolerant `deserialize_with` adapters for stored records
///
/// Older servers stored partial updates without checking them, and wrote
/// `NaN` totals as `null`. These adapters never fail: a value of the wrong
/// shape is coerced and logged, and the rest of the document still loads.
pub mod lenient {
    use super::as_text;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::warn;

    fn parse_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text field; other values are kept as their JSON rendering
    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => {
                warn!(value = %other, "stored text field is not a string");
                as_text(&other)
            }
        })
    }

    /// Whole number; numeric strings are parsed, anything else reads as 0
    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if let Some(n) = raw.as_i64() {
            return Ok(n);
        }

        warn!(value = %raw, "stored integer field coerced");
        Ok(parse_number(&raw)
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
            .unwrap_or_default())
    }

    /// Number; `null` reads back as `NaN`, which is how it was written
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() || raw.is_number() {
            return Ok(raw.as_f64().unwrap_or(f64::NAN));
        }

        warn!(value = %raw, "stored number field coerced");
        Ok(parse_number(&raw).unwrap_or(f64::NAN))
    }

    /// Optional number; values that are not numbers read as `None`
    pub fn optional_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() || raw.is_number() {
            return Ok(raw.as_f64());
        }

        warn!(value = %raw, "stored optional number field coerced");
        Ok(parse_number(&raw))
    }

    /// List of strings; other elements are kept as their JSON rendering
    pub fn strings<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromIterator<String> + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(values) => values.iter().map(as_text).collect(),
            Value::Null => T::default(),
            other => {
                warn!(value = %other, "stored list field is not an array");
                T::default()
            }
        })
    }
}
