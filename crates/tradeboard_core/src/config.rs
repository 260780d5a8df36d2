//! Backend locations.

use std::sync::Arc;
use tradeboard_api::{ApiClient, ApiError, BackendProfile, Jar, normalize_base_url};

/// Variable holding the primary backend's base URL.
pub const PRIMARY_URL_VAR: &str = "TRADEBOARD_API_URL";
/// Variable holding the forecast backend's base URL.
pub const FORECAST_URL_VAR: &str = "TRADEBOARD_FORECAST_URL";
/// Primary backend used when [`PRIMARY_URL_VAR`] is unset or blank.
pub const DEFAULT_PRIMARY_URL: &str = "http://localhost:3000";
/// Forecast backend used when [`FORECAST_URL_VAR`] is unset or blank.
pub const DEFAULT_FORECAST_URL: &str = "http://localhost:4000";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds something that is not a base URL.
    #[error("{var} is not a valid base URL: {value:?}")]
    InvalidUrl {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// An enumerated setting has an unknown value.
    #[error("{var} must be one of {expected}, got {value:?}")]
    UnknownValue {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },

    /// An HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ApiError),
}

/// Base URLs of both backends, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Primary backend: reports, products, purchases, auth.
    pub primary_url: String,
    /// Forecast backend.
    pub forecast_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads variables through `lookup`.
    ///
    /// Unset or blank variables fall back to the defaults. Values such as
    /// `:4000` or `api.example.com` are normalized to full base URLs.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidUrl`] when a value contains whitespace or has no
    /// host.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(var).filter(|value| !value.trim().is_empty()) {
                Some(value) => validate(var, &value),
                None => Ok(default.to_string()),
            }
        };

        Ok(Self {
            primary_url: read(PRIMARY_URL_VAR, DEFAULT_PRIMARY_URL)?,
            forecast_url: read(FORECAST_URL_VAR, DEFAULT_FORECAST_URL)?,
        })
    }

    /// Builds clients for both backends over one cookie jar, so a login on
    /// the primary backend also authenticates forecast requests.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Client`] when an HTTP client cannot be built.
    pub fn connect(&self) -> Result<Clients, ConfigError> {
        let jar = Arc::new(Jar::default());
        let primary = ApiClient::with_jar(&self.primary_url, BackendProfile::PRIMARY, jar.clone())?;
        let forecast = ApiClient::with_jar(&self.forecast_url, BackendProfile::FORECAST, jar)?;
        tracing::debug!(primary = %self.primary_url, forecast = %self.forecast_url, "clients ready");
        Ok(Clients {
            primary: Arc::new(primary),
            forecast: Arc::new(forecast),
        })
    }
}

/// Clients for both backends.
#[derive(Debug, Clone)]
pub struct Clients {
    /// Primary backend.
    pub primary: Arc<ApiClient>,
    /// Forecast backend.
    pub forecast: Arc<ApiClient>,
}

fn validate(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = normalize_base_url(raw);
    let host = url.split_once("://").map_or("", |(_, rest)| rest);
    if url.chars().any(char::is_whitespace) || host.is_empty() || host.starts_with('/') {
        return Err(ConfigError::InvalidUrl {
            var,
            value: raw.to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset_or_blank() {
        let config = ClientConfig::from_lookup(lookup(&[(PRIMARY_URL_VAR, "  ")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn values_are_normalized() {
        let config = ClientConfig::from_lookup(lookup(&[
            (PRIMARY_URL_VAR, ":3001"),
            (FORECAST_URL_VAR, "https://forecast.example.com/"),
        ]))
        .unwrap();
        assert_eq!(config.primary_url, "http://localhost:3001");
        assert_eq!(config.forecast_url, "https://forecast.example.com");
    }

    #[test]
    fn rejects_values_without_host() {
        let err = ClientConfig::from_lookup(lookup(&[(FORECAST_URL_VAR, "http://")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                var: FORECAST_URL_VAR,
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[(PRIMARY_URL_VAR, "api example.com")])).unwrap_err();
        assert!(err.to_string().starts_with(PRIMARY_URL_VAR));
    }

    #[test]
    fn clients_share_the_configured_urls() {
        let clients = ClientConfig::default().connect().unwrap();
        assert_eq!(clients.primary.base_url(), DEFAULT_PRIMARY_URL);
        assert_eq!(clients.forecast.base_url(), DEFAULT_FORECAST_URL);
        assert_eq!(clients.forecast.profile(), BackendProfile::FORECAST);
    }
}
