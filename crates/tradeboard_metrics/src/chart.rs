//! Chart payloads handed to the rendering layer.

use serde::Serialize;

use crate::series::{MONTHS, growth_series};
use crate::share::percentage_shares;

/// Short month labels used when a report carries none.
pub const MONTH_LABELS: [&str; MONTHS] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Palette for donut slices, assigned in order.
pub const DONUT_COLORS: [&str; 5] = ["#3b82f6", "#ec4899", "#f59e0b", "#10b981", "#8b5cf6"];

/// Sales line color.
pub const SALES_COLOR: &str = "#eab308";
/// Purchases line color.
pub const PURCHASES_COLOR: &str = "#06b6d4";
/// Growth bar color.
pub const GROWTH_BAR_COLOR: &str = "rgba(236, 72, 153, 0.7)";
/// Growth line color.
pub const GROWTH_LINE_COLOR: &str = "#ef4444";

/// How a dataset is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Connected line.
    #[default]
    Line,
    /// Vertical bars.
    Bar,
}

/// One labelled series. `None` entries are gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Legend label.
    pub label: String,
    /// One value per label slot.
    pub data: Vec<Option<f64>>,
    /// CSS color.
    pub color: String,
    /// Drawing style.
    pub kind: SeriesKind,
}

impl Dataset {
    /// A line dataset with every slot present.
    pub fn line(label: impl Into<String>, values: &[f64], color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: values.iter().copied().map(Some).collect(),
            color: color.into(),
            kind: SeriesKind::Line,
        }
    }

    /// A line dataset that may contain gaps.
    pub fn sparse(
        label: impl Into<String>,
        data: Vec<Option<f64>>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            data,
            color: color.into(),
            kind: SeriesKind::Line,
        }
    }

    /// Switches the dataset to bars.
    #[must_use]
    pub fn bars(mut self) -> Self {
        self.kind = SeriesKind::Bar;
        self
    }
}

/// Labels with any number of aligned datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineChartData {
    /// X-axis labels.
    pub labels: Vec<String>,
    /// Series, each aligned with `labels`.
    pub datasets: Vec<Dataset>,
}

impl LineChartData {
    /// Chart with the given labels, or [`MONTH_LABELS`] when empty.
    #[must_use]
    pub fn with_labels(labels: &[String]) -> Self {
        Self {
            labels: month_labels_or_default(labels),
            datasets: Vec::new(),
        }
    }

    /// Appends a dataset.
    #[must_use]
    pub fn push(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Looks up a dataset by label.
    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

/// Slices of a donut chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DonutChartData {
    /// Slice labels.
    pub labels: Vec<String>,
    /// Percent share per slice.
    pub values: Vec<f64>,
    /// Slice colors, cycling through [`DONUT_COLORS`].
    pub colors: Vec<String>,
    /// Raw amounts behind each share.
    pub amounts: Vec<f64>,
}

impl DonutChartData {
    /// Builds slices from labelled amounts.
    ///
    /// Shares are taken of `external_total` when positive, else of the amounts'
    /// sum.
    pub fn from_amounts<I, L>(slices: I, external_total: Option<f64>) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let (labels, amounts): (Vec<String>, Vec<f64>) = slices
            .into_iter()
            .map(|(label, amount)| (label.into(), if amount.is_finite() { amount } else { 0.0 }))
            .unzip();
        let values = percentage_shares(&amounts, external_total);
        let colors = (0..labels.len())
            .map(|i| DONUT_COLORS[i % DONUT_COLORS.len()].to_owned())
            .collect();
        Self {
            labels,
            values,
            colors,
            amounts,
        }
    }

    /// Whether there are no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Sales and purchases per month.
///
/// Missing series default to twelve zeros.
#[must_use]
pub fn monthly_line_chart(labels: &[String], sales: &[f64], purchases: &[f64]) -> LineChartData {
    LineChartData::with_labels(labels)
        .push(Dataset::line("Ventas", &or_zeros(sales), SALES_COLOR))
        .push(Dataset::line("Compras", &or_zeros(purchases), PURCHASES_COLOR))
}

/// Sales bars overlaid with their month-over-month growth.
#[must_use]
pub fn growth_chart(labels: &[String], sales: &[f64]) -> LineChartData {
    let sales = or_zeros(sales);
    LineChartData::with_labels(labels)
        .push(Dataset::line("Ventas", &sales, GROWTH_BAR_COLOR).bars())
        .push(Dataset::line(
            "Crecimiento (%)",
            &growth_series(&sales),
            GROWTH_LINE_COLOR,
        ))
}

/// Years from `newest` down to `oldest`, inclusive.
#[must_use]
pub fn year_options(newest: i32, oldest: i32) -> Vec<i32> {
    (oldest..=newest).rev().collect()
}

fn month_labels_or_default(labels: &[String]) -> Vec<String> {
    if labels.is_empty() {
        MONTH_LABELS.iter().map(|l| (*l).to_owned()).collect()
    } else {
        labels.to_vec()
    }
}

fn or_zeros(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        vec![0.0; MONTHS]
    } else {
        values.to_vec()
    }
}
