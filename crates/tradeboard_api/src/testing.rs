//! In-memory [`Transport`] for tests.
//!
//! Available with the `test-utils` feature.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::backend::BackendProfile;
use crate::{ApiError, ApiRequest, Transport};

/// A canned reply for a route.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with a JSON body.
    Json(Value),
    /// 2xx with an empty body.
    Empty,
    /// Non-success status with an optional JSON error body.
    Status(u16, Option<Value>),
    /// Transport failure.
    Network(String),
}

impl Reply {
    fn into_result(self, profile: BackendProfile) -> Result<Option<Value>, ApiError> {
        match self {
            Self::Json(value) => Ok(Some(value)),
            Self::Empty => Ok(None),
            Self::Status(code, payload) => {
                let status = StatusCode::from_u16(code)
                    .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
                Err(ApiError::Status {
                    status: code,
                    message: profile.error_message(status, payload.as_ref()),
                    payload,
                })
            }
            Self::Network(message) => Err(ApiError::Http(message)),
        }
    }
}

/// Answers requests from a route table and records every call.
///
/// Routes match on method and the path without its query string. Later rules
/// win over earlier ones, so a test can change a reply mid-scenario. Requests
/// with no matching rule get a 404.
#[derive(Debug)]
pub struct ScriptedTransport {
    profile: BackendProfile,
    rules: Mutex<Vec<(Method, String, Reply)>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new(BackendProfile::PRIMARY)
    }
}

impl ScriptedTransport {
    /// Creates an empty transport that formats errors like `profile`.
    #[must_use]
    pub fn new(profile: BackendProfile) -> Self {
        Self {
            profile,
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Registers a reply for `method` on `route`.
    pub fn on(&self, method: Method, route: &str, reply: Reply) -> &Self {
        self.rules.lock().push((method, route.to_string(), reply));
        self
    }

    /// Shorthand for a `GET` returning `value`.
    pub fn on_get(&self, route: &str, value: Value) -> &Self {
        self.on(Method::GET, route, Reply::Json(value))
    }

    /// Returns every request sent so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    /// Counts requests sent with `method` to `route`.
    #[must_use]
    pub fn count(&self, method: &Method, route: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == *method && call.route() == route)
            .count()
    }

    /// Returns the most recent request to `route`, any method.
    #[must_use]
    pub fn last_call(&self, route: &str) -> Option<ApiRequest> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|call| call.route() == route)
            .cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let reply = self
            .rules
            .lock()
            .iter()
            .rev()
            .find(|(method, route, _)| *method == request.method && route == request.route())
            .map(|(_, _, reply)| reply.clone());

        self.calls.lock().push(request);

        reply
            .unwrap_or(Reply::Status(404, None))
            .into_result(self.profile)
    }
}
