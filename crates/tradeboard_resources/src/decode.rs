//! Payload shapes shared by several endpoints.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tradeboard_sync::DecodeError;

use crate::lenient;
use crate::records::Page;

/// Deserializes a body that must be present.
pub(crate) fn required<T: DeserializeOwned>(payload: Option<Value>) -> Result<T, DecodeError> {
    Ok(serde_json::from_value(payload.ok_or(DecodeError::Empty)?)?)
}

/// Reads `{data: [...], total}` or a bare array.
///
/// A missing `total` is the number of rows received; a missing body is an
/// empty page.
pub(crate) fn page<T: DeserializeOwned>(payload: Option<Value>) -> Result<Page<T>, DecodeError> {
    let (rows, total) = match payload {
        None | Some(Value::Null) => return Ok(Page::default()),
        Some(Value::Array(rows)) => (rows, None),
        Some(Value::Object(mut body)) => {
            let rows = match body.remove("data") {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            };
            let total = body
                .get("total")
                .filter(|total| !total.is_null())
                .map(lenient::to_i64);
            (rows, total)
        }
        Some(other) => {
            let message = format!("expected a list, got {other}");
            return Err(DecodeError::Shape(serde::de::Error::custom(message)));
        }
    };

    let items: Vec<T> = serde_json::from_value(Value::Array(rows))?;
    let total = total.map_or(items.len() as u64, |t| u64::try_from(t).unwrap_or(0));
    Ok(Page { items, total })
}

/// Reads a bare array or `{data: [...]}`; any other shape is an empty list.
pub(crate) fn list<T: DeserializeOwned>(payload: Option<Value>) -> Result<Vec<T>, DecodeError> {
    let rows = match payload {
        Some(Value::Array(rows)) => rows,
        Some(Value::Object(mut body)) => match body.remove("data") {
            Some(Value::Array(rows)) => rows,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };
    Ok(serde_json::from_value(Value::Array(rows))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_from_envelope_or_array() {
        let page: Page<i32> = page(Some(json!({ "data": [1, 2], "total": 47 }))).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total, 47);

        let page: Page<i32> = super::page(Some(json!([1, 2, 3]))).unwrap();
        assert_eq!(page.total, 3);

        let page: Page<i32> = super::page(Some(json!({ "data": [4], "total": null }))).unwrap();
        assert_eq!(page.total, 1);

        let page: Page<i32> = super::page(None).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn page_rejects_scalars() {
        assert!(matches!(
            page::<i32>(Some(json!("oops"))),
            Err(DecodeError::Shape(_))
        ));
    }

    #[test]
    fn list_ignores_unknown_shapes() {
        assert_eq!(list::<i32>(Some(json!({ "data": [7] }))).unwrap(), vec![7]);
        assert!(list::<i32>(Some(json!({ "error": "x" }))).unwrap().is_empty());
        assert!(list::<i32>(Some(json!(3))).unwrap().is_empty());
    }

    #[test]
    fn required_needs_a_body() {
        assert!(matches!(required::<i32>(None), Err(DecodeError::Empty)));
    }
}
