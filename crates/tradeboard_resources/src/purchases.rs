//! Purchase list and purchase counters.

use serde_json::Value;
use tradeboard_api::{ApiRequest, QueryString};
use tradeboard_sync::{DecodeError, FetchError, Resource, StalePolicy};

use crate::decode;
use crate::records::{Page, Purchase, PurchaseSummary};

/// Month names accepted by the `mes` filter, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Filters and page for [`PurchaseList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseFilter {
    /// Month name from [`MONTH_NAMES`].
    pub month: Option<String>,
    /// Year.
    pub year: Option<i32>,
    /// Product id.
    pub product_id: Option<i64>,
    /// 1-based page.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
}

impl Default for PurchaseFilter {
    fn default() -> Self {
        Self {
            month: None,
            year: None,
            product_id: None,
            page: 1,
            limit: 10,
        }
    }
}

impl PurchaseFilter {
    /// Whether any of month, year or product is set.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.month.is_some() || self.year.is_some() || self.product_id.is_some()
    }
}

/// One page of purchases. Failures clear the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseList;

impl Resource for PurchaseList {
    type Params = PurchaseFilter;
    type Data = Page<Purchase>;

    fn name(&self) -> &'static str {
        "purchase_list"
    }

    fn request(&self, filter: &PurchaseFilter) -> Option<ApiRequest> {
        let path = QueryString::new()
            .opt("mes", filter.month.as_deref())
            .opt("anio", filter.year)
            .opt("id_producto", filter.product_id)
            .param("page", filter.page)
            .param("limit", filter.limit)
            .apply("/api/compras");
        Some(ApiRequest::get(path))
    }

    fn decode(&self, _: &PurchaseFilter, payload: Option<Value>) -> Result<Page<Purchase>, DecodeError> {
        decode::page(payload)
    }

    fn on_failure(&self) -> StalePolicy {
        StalePolicy::Reset
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load the purchase list."
    }

    fn describe_failure(&self, _: &FetchError) -> String {
        self.fallback_message().to_string()
    }
}

/// Number of purchases and money spent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseTotals;

impl Resource for PurchaseTotals {
    type Params = ();
    type Data = PurchaseSummary;

    fn name(&self) -> &'static str {
        "purchase_totals"
    }

    fn request(&self, _: &()) -> Option<ApiRequest> {
        Some(ApiRequest::get("/api/compras/totales"))
    }

    fn decode(&self, _: &(), payload: Option<Value>) -> Result<PurchaseSummary, DecodeError> {
        decode::required(payload)
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load purchase totals."
    }

    fn describe_failure(&self, _: &FetchError) -> String {
        self.fallback_message().to_string()
    }
}
