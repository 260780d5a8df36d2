//! The [`Transport`] seam between data consumers and the network.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{ApiError, ApiRequest};

/// Sends a request and yields the parsed JSON body.
///
/// Calls are at-most-once: implementations never retry. `Ok(None)` means the
/// response had an empty body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends `request` and waits for it to settle.
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        (**self).send(request).await
    }
}
