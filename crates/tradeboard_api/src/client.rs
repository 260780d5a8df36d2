//! HTTP client for the tradeboard backends.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;

use crate::backend::{BackendProfile, normalize_base_url};
use crate::{ApiError, ApiRequest, Transport};

/// HTTP client bound to one backend.
///
/// Session cookies are kept in a [`Jar`] and sent with every request, so two
/// clients built over the same jar share the login session.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    profile: BackendProfile,
}

impl ApiClient {
    /// Creates a client with its own cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot be
    /// initialized.
    pub fn new(base_url: &str, profile: BackendProfile) -> Result<Self, ApiError> {
        Self::with_jar(base_url, profile, Arc::new(Jar::default()))
    }

    /// Creates a client that stores cookies in `jar`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot be
    /// initialized.
    pub fn with_jar(
        base_url: &str,
        profile: BackendProfile,
        jar: Arc<Jar>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|err| ApiError::Http(err.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            profile,
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the backend profile.
    #[must_use]
    pub fn profile(&self) -> BackendProfile {
        self.profile
    }

    /// Resolves `path` against the base URL. Absolute URLs pass through.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let separator = if path.starts_with('/') { "" } else { "/" };
        format!("{}{separator}{path}", self.base_url)
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let url = self.url_for(&request.path);
        tracing::debug!(
            backend = self.profile.name,
            method = %request.method,
            url = %url,
            "sending request"
        );

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            builder = builder.headers(headers).body(serde_json::to_vec(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Http(err.to_string()))?;

        let result = self.profile.interpret(status, &body);
        match &result {
            Ok(_) => tracing::debug!(
                backend = self.profile.name,
                status = status.as_u16(),
                "request settled"
            ),
            Err(err) => tracing::warn!(
                backend = self.profile.name,
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                error = %err,
                "request failed"
            ),
        }
        result
    }
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("backend", &self.profile.name)
            .finish()
    }
}
