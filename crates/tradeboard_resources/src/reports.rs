//! Dashboard reports served by the primary backend.

use serde_json::Value;
use tradeboard_api::{ApiRequest, QueryString};
use tradeboard_sync::{DecodeError, Resource};

use crate::decode;
use crate::lenient;
use crate::records::{MonthlySeries, SalesTotals, TopProduct};

/// Monthly purchases and sales for a year. Nothing is fetched without a year.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyReport;

impl Resource for MonthlyReport {
    type Params = Option<i32>;
    type Data = MonthlySeries;

    fn name(&self) -> &'static str {
        "monthly_report"
    }

    fn request(&self, year: &Option<i32>) -> Option<ApiRequest> {
        let year = (*year)?;
        let path = QueryString::new()
            .param("anio", year)
            .apply("/api/reportes/mensual");
        Some(ApiRequest::get(path))
    }

    fn decode(&self, _: &Option<i32>, payload: Option<Value>) -> Result<MonthlySeries, DecodeError> {
        decode::required(payload)
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load the monthly report."
    }
}

/// Year range for [`Totals`]. Absent bounds are left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    /// First year, inclusive.
    pub from: Option<i32>,
    /// Last year, inclusive.
    pub to: Option<i32>,
}

impl YearRange {
    /// A closed range.
    #[must_use]
    pub fn between(from: i32, to: i32) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Purchase and sales totals over a year range.
#[derive(Debug, Clone, Copy, Default)]
pub struct Totals;

impl Resource for Totals {
    type Params = YearRange;
    type Data = SalesTotals;

    fn name(&self) -> &'static str {
        "totals"
    }

    fn request(&self, range: &YearRange) -> Option<ApiRequest> {
        let path = QueryString::new()
            .opt("desde", range.from)
            .opt("hasta", range.to)
            .apply("/api/reportes/totales");
        Some(ApiRequest::get(path))
    }

    fn decode(&self, _: &YearRange, payload: Option<Value>) -> Result<SalesTotals, DecodeError> {
        decode::required(payload)
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load totals."
    }
}

/// Number of registered products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCount;

impl Resource for ProductCount {
    type Params = ();
    type Data = u64;

    fn name(&self) -> &'static str {
        "product_count"
    }

    fn request(&self, _: &()) -> Option<ApiRequest> {
        Some(ApiRequest::get("/api/reportes/total-productos"))
    }

    fn decode(&self, _: &(), payload: Option<Value>) -> Result<u64, DecodeError> {
        let count = payload
            .as_ref()
            .and_then(|body| body.get("total_productos"))
            .map_or(0, lenient::to_i64);
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load the product count."
    }
}

/// Best-selling products, optionally restricted to one year.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopProducts;

impl Resource for TopProducts {
    type Params = Option<i32>;
    type Data = Vec<TopProduct>;

    fn name(&self) -> &'static str {
        "top_products"
    }

    fn request(&self, year: &Option<i32>) -> Option<ApiRequest> {
        let path = QueryString::new()
            .opt("anio", *year)
            .apply("/api/reportes/top-productos");
        Some(ApiRequest::get(path))
    }

    fn decode(&self, _: &Option<i32>, payload: Option<Value>) -> Result<Vec<TopProduct>, DecodeError> {
        decode::list(payload)
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load top products."
    }
}
