//! Records returned by the backends.
//!
//! Field names follow the wire format. Missing fields default so that partial
//! payloads still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tradeboard_api::extract_document_id;

use crate::lenient;

/// Monthly purchase and sales series for one year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlySeries {
    /// Month labels as provided by the report, possibly empty.
    pub labels: Vec<String>,
    /// Purchases per month.
    #[serde(deserialize_with = "lenient::numbers")]
    pub compras: Vec<f64>,
    /// Sales per month.
    #[serde(deserialize_with = "lenient::numbers")]
    pub ventas: Vec<f64>,
}

/// Aggregate purchases and sales over a year range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesTotals {
    /// Sum of purchases.
    #[serde(deserialize_with = "lenient::number")]
    pub total_compras: f64,
    /// Sum of sales.
    #[serde(deserialize_with = "lenient::number")]
    pub total_ventas: f64,
}

/// One entry of the best-selling products ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopProduct {
    /// Product name.
    pub nombre: String,
    /// Sales amount.
    #[serde(deserialize_with = "lenient::number")]
    pub total_bs: f64,
}

/// A product with its stock level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Primary key.
    #[serde(deserialize_with = "lenient::integer")]
    pub id: i64,
    /// Display name.
    pub nombre: String,
    /// Units in stock.
    #[serde(deserialize_with = "lenient::integer")]
    pub stock_cantidad: i64,
}

impl Product {
    /// Whether any units are in stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock_cantidad > 0
    }
}

/// Product counts relative to a low-stock threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStats {
    /// All products.
    pub total: u64,
    /// Products with stock.
    pub con_stock: u64,
    /// Products below the threshold.
    pub low_stock: u64,
    /// Threshold the counts were computed with.
    pub umbral: u32,
}

/// A purchase line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Purchase {
    /// Primary key.
    #[serde(deserialize_with = "lenient::integer")]
    pub id: i64,
    /// Month name, e.g. `ENERO`.
    pub mes: String,
    /// Year.
    #[serde(deserialize_with = "lenient::integer")]
    pub anio: i64,
    /// Purchased product.
    #[serde(deserialize_with = "lenient::integer")]
    pub id_producto: i64,
    /// Units purchased.
    #[serde(deserialize_with = "lenient::number")]
    pub cantidad: f64,
    /// Price per unit.
    #[serde(deserialize_with = "lenient::number")]
    pub precio_unitario: f64,
    /// Line total.
    #[serde(deserialize_with = "lenient::number")]
    pub precio_total: f64,
}

/// Purchase counters shown above the purchase list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseSummary {
    /// Number of purchases.
    #[serde(rename = "totalCompras", deserialize_with = "lenient::integer")]
    pub count: i64,
    /// Money spent on purchases.
    #[serde(rename = "totalIngresos", deserialize_with = "lenient::number")]
    pub amount: f64,
}

/// One forecast point with its confidence band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPoint {
    /// Point date, an ISO-8601 timestamp.
    #[serde(deserialize_with = "lenient::text")]
    pub fecha: String,
    /// Predicted value.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub pronostico: Option<f64>,
    /// Lower bound.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub limite_inferior: Option<f64>,
    /// Upper bound.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub limite_superior: Option<f64>,
}

/// A stored forecast run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    /// Raw document id: a string or `{"$oid": ...}`.
    #[serde(rename = "_id")]
    pub raw_id: Value,
    /// Run name.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub nombre: Option<String>,
    /// Free-form notes.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub notas: Option<String>,
    /// Sampling frequency, e.g. `MS`.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub frecuencia: Option<String>,
    /// Forecast horizon.
    #[serde(deserialize_with = "lenient::optional_count")]
    pub periodos: Option<u32>,
    /// Training window start.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub desde: Option<String>,
    /// Training window end.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub hasta: Option<String>,
    /// Creation timestamp.
    #[serde(rename = "creadoEn", deserialize_with = "lenient::optional_text")]
    pub creado_en: Option<String>,
    /// Predicted points; malformed entries are skipped.
    #[serde(deserialize_with = "lenient::items")]
    pub predicciones: Vec<ForecastPoint>,
}

impl Forecast {
    /// The document id as a plain string, empty when absent.
    #[must_use]
    pub fn id(&self) -> String {
        extract_document_id(&self.raw_id)
    }
}

/// The signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Login name.
    pub nombre_usuario: String,
    /// Full name.
    pub nombre_completo: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Full name when present, else the login name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nombre_completo
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.nombre_usuario)
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Rows across all pages.
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Page<T> {
    /// Whether the page holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
