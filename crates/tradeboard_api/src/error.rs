//! Error types for remote data access.

use serde_json::Value;

/// Errors raised by a [`Transport`](crate::Transport).
///
/// Every variant renders a human-readable message through `Display`, which is
/// what resource hooks and mutation handlers surface to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure before a response was received (connection refused,
    /// DNS, TLS, body read failure).
    #[error("http error: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message taken from the error body, or the status line.
        message: String,
        /// The parsed response body, if any.
        payload: Option<Value>,
    },

    /// The response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// JSON serialization error while building a request.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code, when the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw parsed error payload, when one was present.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` for 4xx responses, i.e. the server rejected the request.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }
}
