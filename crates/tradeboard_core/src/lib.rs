//! Ambient setup shared by tradeboard binaries.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`ClientConfig`] | Backend base URLs from the environment |
//! | [`Clients`] | Primary and forecast clients sharing one cookie jar |
//! | [`TracingSetup`] | Installs the `tracing` subscriber |
//!
//! Libraries never install a subscriber; only binaries call
//! [`TracingSetup::init`].

mod config;
mod tracing_setup;

pub use config::{
    ClientConfig, Clients, ConfigError, DEFAULT_FORECAST_URL, DEFAULT_PRIMARY_URL, FORECAST_URL_VAR,
    PRIMARY_URL_VAR,
};
pub use tracing_setup::{LOG_FILTER_VAR, LOG_FORMAT_VAR, TracingFormat, TracingSetup};
