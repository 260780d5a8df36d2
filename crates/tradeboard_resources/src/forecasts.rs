//! Forecast documents on the forecast backend.

use serde_json::Value;
use tradeboard_api::{ApiRequest, QueryString};
use tradeboard_sync::{DecodeError, FetchError, Resource, StalePolicy};

use crate::records::Forecast;

/// Collection path of forecast documents.
pub const FORECASTS_PATH: &str = "/api/predecir";

/// Creation-date window for [`ForecastList`], as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest creation date.
    pub from: Option<String>,
    /// Latest creation date.
    pub to: Option<String>,
}

/// Every forecast created within a date window.
///
/// The endpoint answers with a bare array; anything else reads as an empty
/// list. Failures clear the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastList;

impl Resource for ForecastList {
    type Params = DateRange;
    type Data = Vec<Forecast>;

    fn name(&self) -> &'static str {
        "forecast_list"
    }

    fn request(&self, range: &DateRange) -> Option<ApiRequest> {
        let path = QueryString::new()
            .opt("desde", range.from.as_deref())
            .opt("hasta", range.to.as_deref())
            .apply(FORECASTS_PATH);
        Some(ApiRequest::get(path))
    }

    fn decode(&self, _: &DateRange, payload: Option<Value>) -> Result<Vec<Forecast>, DecodeError> {
        match payload {
            Some(rows @ Value::Array(_)) => Ok(serde_json::from_value(rows)?),
            _ => Ok(Vec::new()),
        }
    }

    fn on_failure(&self) -> StalePolicy {
        StalePolicy::Reset
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load the forecast list."
    }

    fn describe_failure(&self, _: &FetchError) -> String {
        self.fallback_message().to_string()
    }
}
