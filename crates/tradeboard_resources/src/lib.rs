//! Resource descriptors for every endpoint the tradeboard views read.
//!
//! Each descriptor implements [`tradeboard_sync::Resource`]: it builds the
//! request for its parameters, decodes the payload into a record from
//! the records below, and picks what happens to stale data when a
//! fetch starts or fails.
//!
//! | Resource | Params | Endpoint | On failure |
//! |----------|--------|----------|------------|
//! | [`MonthlyReport`] | year | `/api/reportes/mensual` | keep data |
//! | [`Totals`] | [`YearRange`] | `/api/reportes/totales` | keep data |
//! | [`ProductCount`] | - | `/api/reportes/total-productos` | keep data |
//! | [`TopProducts`] | year | `/api/reportes/top-productos` | keep data |
//! | [`ProductList`] | [`ProductQuery`] | `/api/productos` | keep data, generic message |
//! | [`ProductStats`] | threshold | `/api/productos/stats` | reset at start, generic message |
//! | [`ProductCatalog`] | - | `/api/productos/all` | keep data, generic message |
//! | [`PurchaseList`] | [`PurchaseFilter`] | `/api/compras` | reset, generic message |
//! | [`PurchaseTotals`] | - | `/api/compras/totales` | keep data, generic message |
//! | [`ForecastList`] | [`DateRange`] | `/api/predecir` (forecast backend) | reset, generic message |
//! | [`Profile`] | - | `/api/profile` | keep data |
//!
//! # Records
//!
//! Numeric columns may arrive as JSON strings or `null`; the records read
//! both as numbers (`null` as zero).

mod decode;
mod forecasts;
mod lenient;
mod products;
mod profile;
mod purchases;
mod records;
mod reports;

pub use forecasts::{DateRange, FORECASTS_PATH, ForecastList};
pub use products::{LOW_STOCK_THRESHOLD, ProductCatalog, ProductList, ProductQuery, ProductStats};
pub use profile::Profile;
pub use purchases::{MONTH_NAMES, PurchaseFilter, PurchaseList, PurchaseTotals};
pub use records::{
    Forecast, ForecastPoint, MonthlySeries, Page, Product, Purchase, PurchaseSummary, SalesTotals,
    StockStats, TopProduct, UserProfile,
};
pub use reports::{MonthlyReport, ProductCount, TopProducts, Totals, YearRange};
