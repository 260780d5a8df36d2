//! The [`Resource`] trait describing one remotely held value.

use core::fmt::Debug;
use serde_json::Value;
use tradeboard_api::{ApiError, ApiRequest};

/// A fetched payload did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body was empty but the resource needs one.
    #[error("empty response body")]
    Empty,

    /// The body did not deserialize into the expected record.
    #[error("unexpected payload: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Why a fetch did not produce data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response arrived but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// What to do with previously committed data when a fetch fails or starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Keep showing the last committed data.
    #[default]
    Keep,
    /// Replace it with the resource's empty form.
    Reset,
}

/// Describes how to fetch and decode one remote resource.
///
/// Implementations are pure descriptors: they build the request for a
/// parameter tuple and turn the payload into typed data. The
/// [`ResourceHook`](crate::ResourceHook) owns state, ordering and error
/// capture.
pub trait Resource: Send + Sync + 'static {
    /// Parameter tuple; equality decides whether a new fetch is needed.
    type Params: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Decoded data.
    type Data: Clone + Debug + Default + Send + Sync + 'static;

    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Builds the request for `params`, or `None` when there is nothing to
    /// fetch (a required parameter is absent).
    fn request(&self, params: &Self::Params) -> Option<ApiRequest>;

    /// Decodes a successful payload. `None` means the body was empty.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the payload has an unexpected shape.
    fn decode(&self, params: &Self::Params, payload: Option<Value>)
    -> Result<Self::Data, DecodeError>;

    /// The empty form of the data for `params`.
    fn empty(&self, _params: &Self::Params) -> Self::Data {
        Self::Data::default()
    }

    /// Policy applied when a new fetch starts.
    fn on_start(&self) -> StalePolicy {
        StalePolicy::Keep
    }

    /// Policy applied when a fetch fails.
    fn on_failure(&self) -> StalePolicy {
        StalePolicy::Keep
    }

    /// Message used when the failure carries none.
    fn fallback_message(&self) -> &'static str {
        "Could not load data."
    }

    /// Turns a failure into the message stored in the hook's state.
    fn describe_failure(&self, error: &FetchError) -> String {
        let message = error.to_string();
        if message.trim().is_empty() {
            self.fallback_message().to_string()
        } else {
            message
        }
    }
}
