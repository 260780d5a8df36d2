//! Product list, stock statistics and the product catalog.

use serde_json::Value;
use tradeboard_api::{ApiRequest, QueryString};
use tradeboard_sync::{DecodeError, FetchError, Resource, StalePolicy};

use crate::decode;
use crate::lenient;
use crate::records::{Page, Product, StockStats};

/// Threshold below which a product counts as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Page and search text for [`ProductList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// 1-based page.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
    /// Search text; blank means no filter.
    pub search: String,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
        }
    }
}

/// One page of products, optionally filtered by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductList;

impl Resource for ProductList {
    type Params = ProductQuery;
    type Data = Page<Product>;

    fn name(&self) -> &'static str {
        "product_list"
    }

    fn request(&self, query: &ProductQuery) -> Option<ApiRequest> {
        let path = QueryString::new()
            .param("page", query.page)
            .param("limit", query.limit)
            .opt("q", Some(query.search.trim()))
            .apply("/api/productos");
        Some(ApiRequest::get(path))
    }

    fn decode(&self, _: &ProductQuery, payload: Option<Value>) -> Result<Page<Product>, DecodeError> {
        decode::page(payload)
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load the product list."
    }

    fn describe_failure(&self, _: &FetchError) -> String {
        self.fallback_message().to_string()
    }
}

/// Stock statistics for a low-stock threshold.
///
/// Counts reset to zero whenever a new fetch starts; fields missing from the
/// response are back-filled with zero, and the threshold with the requested
/// one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductStats;

impl Resource for ProductStats {
    type Params = u32;
    type Data = StockStats;

    fn name(&self) -> &'static str {
        "product_stats"
    }

    fn request(&self, threshold: &u32) -> Option<ApiRequest> {
        let path = QueryString::new()
            .param("umbral", threshold)
            .apply("/api/productos/stats");
        Some(ApiRequest::get(path))
    }

    fn decode(&self, threshold: &u32, payload: Option<Value>) -> Result<StockStats, DecodeError> {
        let body = payload.ok_or(DecodeError::Empty)?;
        let count = |field: &str| {
            body.get(field)
                .map_or(0, |v| u64::try_from(lenient::to_i64(v)).unwrap_or(0))
        };
        let umbral = body
            .get("umbral")
            .filter(|v| !v.is_null())
            .and_then(|v| u32::try_from(lenient::to_i64(v)).ok())
            .unwrap_or(*threshold);

        Ok(StockStats {
            total: count("total"),
            con_stock: count("con_stock"),
            low_stock: count("low_stock"),
            umbral,
        })
    }

    fn empty(&self, threshold: &u32) -> StockStats {
        StockStats {
            umbral: *threshold,
            ..StockStats::default()
        }
    }

    fn on_start(&self) -> StalePolicy {
        StalePolicy::Reset
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load product statistics."
    }

    fn describe_failure(&self, _: &FetchError) -> String {
        self.fallback_message().to_string()
    }
}

/// Every product, for selection lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCatalog;

impl Resource for ProductCatalog {
    type Params = ();
    type Data = Vec<Product>;

    fn name(&self) -> &'static str {
        "product_catalog"
    }

    fn request(&self, _: &()) -> Option<ApiRequest> {
        Some(ApiRequest::get("/api/productos/all"))
    }

    fn decode(&self, _: &(), payload: Option<Value>) -> Result<Vec<Product>, DecodeError> {
        decode::list(payload)
    }

    fn fallback_message(&self) -> &'static str {
        "Could not load products."
    }

    fn describe_failure(&self, _: &FetchError) -> String {
        self.fallback_message().to_string()
    }
}
