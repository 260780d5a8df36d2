//! Backend profiles and base URL handling.

use reqwest::StatusCode;
use serde_json::Value;

use crate::ApiError;

/// How a backend reports errors and encodes bodies.
///
/// The primary (relational) API and the forecast (document) API disagree on
/// the field names used for error messages and on whether a non-JSON body is
/// acceptable. Both always raise on non-success statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProfile {
    /// Short name used in log output.
    pub name: &'static str,
    /// Fields consulted, in order, for an error message.
    pub message_fields: &'static [&'static str],
    /// Keep an unparsable body as a JSON string instead of failing.
    pub lenient_json: bool,
}

impl BackendProfile {
    /// Purchases, sales, products, reports and auth.
    pub const PRIMARY: Self = Self {
        name: "primary",
        message_fields: &["message", "error"],
        lenient_json: false,
    };

    /// Forecast documents.
    pub const FORECAST: Self = Self {
        name: "forecast",
        message_fields: &["mensaje", "detalle"],
        lenient_json: true,
    };

    /// Picks the error message for a failed response.
    ///
    /// Falls back to the canonical reason phrase, then to `HTTP <code>`.
    #[must_use]
    pub fn error_message(&self, status: StatusCode, payload: Option<&Value>) -> String {
        payload
            .and_then(|payload| {
                self.message_fields
                    .iter()
                    .filter_map(|field| payload.get(field).and_then(Value::as_str))
                    .find(|message| !message.is_empty())
            })
            .map(str::to_string)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    }

    /// Turns a settled response into the value handed back to callers.
    ///
    /// An empty body yields `None`. A body that is not JSON is kept as a
    /// string on lenient backends and rejected otherwise; a failed status with
    /// an unreadable body still reports the status.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for non-success statuses and
    /// [`ApiError::InvalidResponse`] for unparsable success bodies on strict
    /// backends.
    pub fn interpret(&self, status: StatusCode, body: &str) -> Result<Option<Value>, ApiError> {
        let payload = if body.is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(body) {
                Ok(value) => Some(value),
                Err(_) if self.lenient_json => Some(Value::String(body.to_string())),
                Err(_) if !status.is_success() => None,
                Err(err) => {
                    return Err(ApiError::InvalidResponse(format!(
                        "failed to parse response: {err}\nBody: {body}"
                    )));
                }
            }
        };

        if status.is_success() {
            return Ok(payload);
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message: self.error_message(status, payload.as_ref()),
            payload,
        })
    }
}

/// Normalizes a configured base URL.
///
/// - `":4000"` and `"4000"` address `localhost` on that port
/// - `"//host"` gets the `http:` scheme
/// - a bare host gets `http://`
/// - explicit `http(s)://` is kept
///
/// A single trailing `/` is removed. An empty input stays empty.
#[must_use]
pub fn normalize_base_url(base: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        return String::new();
    }

    let lower = base.to_ascii_lowercase();
    let mut url = if lower.starts_with("http://") || lower.starts_with("https://") {
        base.to_string()
    } else if let Some(port) = base.strip_prefix(':').filter(|p| is_port(p)) {
        format!("http://localhost:{port}")
    } else if is_port(base) {
        format!("http://localhost:{base}")
    } else if let Some(rest) = base.strip_prefix("//") {
        format!("http://{rest}")
    } else {
        format!("http://{base}")
    };

    if url.ends_with('/') {
        url.pop();
    }
    url
}

fn is_port(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primary_prefers_message_then_error() {
        let profile = BackendProfile::PRIMARY;

        let msg = profile.error_message(
            StatusCode::BAD_REQUEST,
            Some(&json!({ "message": "bad", "error": "worse" })),
        );
        assert_eq!(msg, "bad");

        let msg = profile.error_message(StatusCode::BAD_REQUEST, Some(&json!({ "error": "worse" })));
        assert_eq!(msg, "worse");
    }

    #[test]
    fn forecast_uses_its_own_fields() {
        let profile = BackendProfile::FORECAST;
        let payload = json!({ "message": "ignored", "detalle": "rango inválido" });

        assert_eq!(
            profile.error_message(StatusCode::UNPROCESSABLE_ENTITY, Some(&payload)),
            "rango inválido"
        );
    }

    #[test]
    fn falls_back_to_status_line() {
        let profile = BackendProfile::PRIMARY;
        assert_eq!(profile.error_message(StatusCode::NOT_FOUND, None), "Not Found");

        let odd = StatusCode::from_u16(599).expect("valid status");
        assert_eq!(profile.error_message(odd, None), "HTTP 599");
    }

    #[test]
    fn empty_body_is_none() {
        let result = BackendProfile::PRIMARY.interpret(StatusCode::NO_CONTENT, "");
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn failed_status_carries_payload() {
        let err = BackendProfile::PRIMARY
            .interpret(StatusCode::CONFLICT, r#"{"message":"duplicado"}"#)
            .expect_err("409 must fail");

        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "duplicado");
        assert_eq!(err.payload(), Some(&json!({ "message": "duplicado" })));
    }

    #[test]
    fn strict_backend_rejects_non_json_success() {
        let err = BackendProfile::PRIMARY
            .interpret(StatusCode::OK, "<html>")
            .expect_err("html is not json");
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn strict_backend_reports_status_for_non_json_failure() {
        let err = BackendProfile::PRIMARY
            .interpret(StatusCode::BAD_GATEWAY, "<html>")
            .expect_err("502 must fail");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn lenient_backend_keeps_raw_text() {
        let value = BackendProfile::FORECAST
            .interpret(StatusCode::OK, "ok")
            .expect("lenient parse");
        assert_eq!(value, Some(Value::String("ok".to_string())));
    }

    #[test]
    fn normalize_handles_shorthand_forms() {
        assert_eq!(normalize_base_url(":4000"), "http://localhost:4000");
        assert_eq!(normalize_base_url("4000"), "http://localhost:4000");
        assert_eq!(normalize_base_url("//api.local"), "http://api.local");
        assert_eq!(normalize_base_url("api.local:8080/"), "http://api.local:8080");
        assert_eq!(normalize_base_url("HTTPS://api.local/"), "HTTPS://api.local");
        assert_eq!(normalize_base_url("  "), "");
    }
}
