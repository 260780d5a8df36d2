//! Remote data access for tradeboard.
//!
//! A single [`Transport`] seam performs one JSON request against a backend:
//! credentials (cookies) travel with every call, a JSON content type is set
//! only when a body is present, and failed statuses become a structured
//! [`ApiError`] carrying the status code, a readable message and the raw
//! payload. Calls are never retried.
//!
//! Two backends are addressed through [`BackendProfile`]s:
//!
//! | Profile | Serves | Error message fields |
//! |---------|--------|----------------------|
//! | [`BackendProfile::PRIMARY`] | purchases, sales, products, reports, auth | `message`, `error` |
//! | [`BackendProfile::FORECAST`] | forecast documents | `mensaje`, `detalle` |
//!
//! # Example
//!
//! ```no_run
//! use tradeboard_api::{ApiClient, ApiRequest, BackendProfile, QueryString, Transport};
//!
//! # async fn run() -> Result<(), tradeboard_api::ApiError> {
//! let client = ApiClient::new("http://localhost:3000", BackendProfile::PRIMARY)?;
//! let path = QueryString::new().param("anio", 2024).apply("/api/reportes/mensual");
//! let report = client.send(ApiRequest::get(path)).await?;
//! # let _ = report;
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `test-utils` - Enables [`testing::ScriptedTransport`] for offline tests

mod backend;
mod client;
mod documents;
mod error;
mod request;
mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use backend::{BackendProfile, normalize_base_url};
pub use client::ApiClient;
pub use documents::{extract_document_id, is_object_id, parse_utc_date, to_date_input};
pub use error::ApiError;
pub use request::{ApiRequest, QueryString};
pub use reqwest::Method;
pub use reqwest::cookie::Jar;
pub use transport::Transport;
