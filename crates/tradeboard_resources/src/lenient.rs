//! Tolerant deserializers.
//!
//! The relational backend serializes `NUMERIC` columns as strings
//! (`"12.50"`), and aggregate endpoints may return `null` for empty sets.
//! Both read as `0` here. Display-only fields of stored documents are read
//! without failing the document when their type is off.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

pub(crate) fn to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .or_else(|_| s.parse::<f64>().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

pub(crate) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map_or(0.0, to_f64))
}

pub(crate) fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .map_or(0, to_i64))
}

pub(crate) fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|v| !v.is_null())
        .map(|v| to_f64(&v)))
}

/// A non-negative whole count; anything else reads as absent.
pub(crate) fn optional_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(to_count))
}

/// Strings as is, numbers and booleans rendered; anything else is absent.
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(to_text))
}

pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// Elements that decode as `T`; others are skipped, a non-array is empty.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn to_count(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number < 0.0 || number.fract() != 0.0 {
        return None;
    }
    u32::try_from(number as u64).ok()
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.iter().map(to_f64).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_and_nulls() {
        assert_eq!(to_f64(&json!("12.50")), 12.5);
        assert_eq!(to_f64(&json!(3)), 3.0);
        assert_eq!(to_f64(&json!(null)), 0.0);
        assert_eq!(to_f64(&json!("n/a")), 0.0);
        assert_eq!(to_i64(&json!("42")), 42);
        assert_eq!(to_i64(&json!("7.9")), 7);
        assert_eq!(to_i64(&json!(5.0)), 5);
    }

    #[test]
    fn counts_accept_whole_floats_only() {
        assert_eq!(to_count(&json!(12)), Some(12));
        assert_eq!(to_count(&json!(12.0)), Some(12));
        assert_eq!(to_count(&json!("6")), Some(6));
        assert_eq!(to_count(&json!(2.5)), None);
        assert_eq!(to_count(&json!(-1)), None);
        assert_eq!(to_count(&json!("doce")), None);
        assert_eq!(to_count(&json!(null)), None);
    }

    #[test]
    fn text_renders_scalars() {
        assert_eq!(to_text(&json!("MS")), Some("MS".to_string()));
        assert_eq!(to_text(&json!(2024)), Some("2024".to_string()));
        assert_eq!(to_text(&json!({ "$date": 1 })), None);
    }
}
