//! Request descriptions handed to a [`Transport`](crate::Transport).

use core::fmt::Display;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::ApiError;

/// A single HTTP request against one backend.
///
/// The path is relative to the backend's base URL and may carry a query
/// string built with [`QueryString`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL (or an absolute `http(s)://` URL).
    pub path: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with the given method and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a `PUT` request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body that is already a [`Value`].
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` and attaches it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Json`] if `body` cannot be represented as JSON.
    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self, ApiError> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    /// Returns the path without its query string.
    #[must_use]
    pub fn route(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(route, _)| route)
    }

    /// Returns the value of a query parameter, decoded.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        let (_, query) = self.path.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|value| value.into_owned())
    }
}

/// Builder for percent-encoded query strings.
///
/// Optional parameters that are `None` or empty are skipped, matching how the
/// backends treat absent filters.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Creates an empty query string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter unconditionally.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a parameter when `value` is present and not blank.
    #[must_use]
    pub fn opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value.map(|value| value.to_string()) {
            Some(value) if !value.trim().is_empty() => self.param(key, value),
            _ => self,
        }
    }

    /// Returns `true` when no parameter was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the encoded query, without the leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the query to `path`. An empty query leaves the path untouched.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_skips_blank_optionals() {
        let query = QueryString::new()
            .opt("mes", Some(""))
            .opt("anio", None::<i32>)
            .opt("id_producto", Some(7))
            .param("page", 1)
            .param("limit", 10);

        assert_eq!(query.apply("/api/compras"), "/api/compras?id_producto=7&page=1&limit=10");
    }

    #[test]
    fn query_encodes_values() {
        let query = QueryString::new().param("q", "aceite & sal");
        assert_eq!(query.encode(), "q=aceite%20%26%20sal");
    }

    #[test]
    fn empty_query_keeps_path() {
        assert_eq!(QueryString::new().apply("/api/reportes/totales"), "/api/reportes/totales");
    }

    #[test]
    fn route_and_query_param() {
        let request = ApiRequest::get("/api/productos?page=2&q=caf%C3%A9");

        assert_eq!(request.route(), "/api/productos");
        assert_eq!(request.query_param("page").as_deref(), Some("2"));
        assert_eq!(request.query_param("q").as_deref(), Some("café"));
        assert_eq!(request.query_param("limit"), None);
    }

    #[test]
    fn with_json_serializes_body() {
        #[derive(Serialize)]
        struct Payload {
            nombre: &'static str,
            stock_cantidad: u32,
        }

        let request = ApiRequest::post("/api/productos")
            .with_json(&Payload {
                nombre: "Arroz",
                stock_cantidad: 12,
            })
            .expect("payload serializes");

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({ "nombre": "Arroz", "stock_cantidad": 12 })));
    }
}
