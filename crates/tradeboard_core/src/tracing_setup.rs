//! Subscriber installation.

use core::str::FromStr;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Environment and Format
// ─────────────────────────────────────────────────────────────────────────────

/// Variable holding a filter directive such as `tradeboard=debug,reqwest=warn`.
pub const LOG_FILTER_VAR: &str = "TRADEBOARD_LOG";
/// Variable selecting the output format: `pretty`, `compact` or `json`.
pub const LOG_FORMAT_VAR: &str = "TRADEBOARD_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// JSON lines for log aggregation.
    Json,
}

impl FromStr for TracingFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownValue {
                var: LOG_FORMAT_VAR,
                value: value.to_string(),
                expected: "pretty, compact, json",
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscriber Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for the global `tracing` subscriber.
///
/// ```
/// use tradeboard_core::{TracingFormat, TracingSetup};
/// use tracing::Level;
///
/// TracingSetup::new()
///     .with_level(Level::DEBUG)
///     .with_format(TracingFormat::Compact)
///     .with_env_filter("tradeboard=debug,reqwest=warn")
///     .init();
/// ```
#[derive(Debug, Clone)]
pub struct TracingSetup {
    level: Level,
    format: TracingFormat,
    env_filter: Option<String>,
    span_events: bool,
}

impl Default for TracingSetup {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingSetup {
    /// Info level, pretty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads [`LOG_FILTER_VAR`] and [`LOG_FORMAT_VAR`] from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// See [`TracingSetup::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the log variables through `lookup`; unset or blank ones keep
    /// the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownValue`] for an unknown format.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let mut setup = Self::default();
        if let Some(format) = present(LOG_FORMAT_VAR) {
            setup.format = format.parse()?;
        }
        if let Some(filter) = present(LOG_FILTER_VAR) {
            setup.env_filter = Some(filter);
        }
        Ok(setup)
    }

    /// Sets the maximum level used when no filter directive applies.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a filter directive, `target=level,...`.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Emits span enter/exit events.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Configured output format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    /// Installs the subscriber. Does nothing if one is already installed.
    ///
    /// An invalid filter directive falls back to the configured level.
    pub fn init(&self) {
        let filter = self.filter();
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            TracingFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init(),
            TracingFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init(),
            TracingFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init(),
        };

        if installed.is_ok() {
            tracing::debug!(level = %self.level, format = ?self.format, "tracing initialized");
        }
    }

    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(directive) => EnvFilter::try_new(directive)
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
            None => EnvFilter::new(self.level.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let setup = TracingSetup::default();
        assert_eq!(setup.level, Level::INFO);
        assert_eq!(setup.format(), TracingFormat::Pretty);
        assert!(setup.env_filter.is_none());
    }

    #[test]
    fn parses_formats() {
        assert_eq!(" JSON ".parse::<TracingFormat>().unwrap(), TracingFormat::Json);
        assert_eq!("compact".parse::<TracingFormat>().unwrap(), TracingFormat::Compact);
        assert!("yaml".parse::<TracingFormat>().is_err());
    }

    #[test]
    fn reads_variables() {
        let setup = TracingSetup::from_lookup(|var| match var {
            LOG_FORMAT_VAR => Some("json".to_string()),
            LOG_FILTER_VAR => Some("tradeboard=debug".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(setup.format(), TracingFormat::Json);
        assert_eq!(setup.env_filter.as_deref(), Some("tradeboard=debug"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        let setup = TracingSetup::new().with_env_filter("not a [valid directive");
        setup.init();
        setup.init();
    }
}
