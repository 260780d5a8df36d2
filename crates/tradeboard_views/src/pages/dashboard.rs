use std::sync::Arc;
use tradeboard_api::Transport;
use tradeboard_metrics::{
    DonutChartData, LineChartData, ProfitSummary, TrendSummary, growth_chart, monthly_line_chart,
    trend_summary, year_options,
};
use tradeboard_resources::{
    MonthlyReport, MonthlySeries, ProductCount, SalesTotals, TopProduct, TopProducts, Totals,
    YearRange,
};
use tradeboard_sync::{RefreshToken, RequestState, ResourceHook};

use super::run;

/// Most recent selectable year.
pub const NEWEST_YEAR: i32 = 2025;
/// Oldest selectable year; also the start of the all-time totals.
pub const OLDEST_YEAR: i32 = 1992;

/// Yearly overview: monthly series, all-time totals, product count and the
/// best sellers.
pub struct DashboardPage {
    transport: Arc<dyn Transport>,
    year: i32,
    monthly: ResourceHook<MonthlyReport>,
    totals: ResourceHook<Totals>,
    products: ResourceHook<ProductCount>,
    top: ResourceHook<TopProducts>,
}

impl DashboardPage {
    /// Creates the page showing [`NEWEST_YEAR`].
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            year: NEWEST_YEAR,
            monthly: ResourceHook::new(MonthlyReport),
            totals: ResourceHook::new(Totals),
            products: ResourceHook::new(ProductCount),
            top: ResourceHook::new(TopProducts),
        }
    }

    /// Years offered in the selector, newest first.
    #[must_use]
    pub fn year_options() -> Vec<i32> {
        year_options(NEWEST_YEAR, OLDEST_YEAR)
    }

    /// Selected year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Selects a year; the monthly report follows on the next sync.
    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Fetches whatever changed since the last sync.
    pub async fn sync(&self) {
        let transport = &*self.transport;
        let token = RefreshToken::default();
        futures::join!(
            run(self.monthly.observe(&Some(self.year), token), transport),
            run(
                self.totals
                    .observe(&YearRange::between(OLDEST_YEAR, NEWEST_YEAR), token),
                transport
            ),
            run(self.products.observe(&(), token), transport),
            run(self.top.observe(&None, token), transport),
        );
    }

    /// Monthly report state.
    #[must_use]
    pub fn monthly(&self) -> RequestState<MonthlySeries> {
        self.monthly.state()
    }

    /// All-time totals state.
    #[must_use]
    pub fn totals(&self) -> RequestState<SalesTotals> {
        self.totals.state()
    }

    /// Number of products.
    #[must_use]
    pub fn product_count(&self) -> RequestState<u64> {
        self.products.state()
    }

    /// Best sellers.
    #[must_use]
    pub fn top_products(&self) -> RequestState<Vec<TopProduct>> {
        self.top.state()
    }

    /// Whether any section is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.monthly.read(|s| s.loading)
            || self.totals.read(|s| s.loading)
            || self.products.read(|s| s.loading)
            || self.top.read(|s| s.loading)
    }

    /// Error messages of failed sections.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        [
            self.monthly.read(|s| s.error.clone()),
            self.totals.read(|s| s.error.clone()),
            self.products.read(|s| s.error.clone()),
            self.top.read(|s| s.error.clone()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Sales and purchases per month of the selected year.
    #[must_use]
    pub fn line_chart(&self) -> LineChartData {
        self.monthly
            .read(|s| monthly_line_chart(&s.data.labels, &s.data.ventas, &s.data.compras))
    }

    /// Monthly sales with their growth.
    #[must_use]
    pub fn growth_chart(&self) -> LineChartData {
        self.monthly
            .read(|s| growth_chart(&s.data.labels, &s.data.ventas))
    }

    /// Sales card of the selected year.
    #[must_use]
    pub fn sales_summary(&self) -> TrendSummary {
        self.monthly.read(|s| trend_summary(&s.data.ventas))
    }

    /// Purchases card of the selected year.
    #[must_use]
    pub fn purchases_summary(&self) -> TrendSummary {
        self.monthly.read(|s| trend_summary(&s.data.compras))
    }

    /// All-time profit and margin.
    #[must_use]
    pub fn profit(&self) -> ProfitSummary {
        self.totals
            .read(|s| ProfitSummary::new(s.data.total_ventas, s.data.total_compras))
    }

    /// Best sellers as shares of all-time sales.
    #[must_use]
    pub fn top_products_donut(&self) -> DonutChartData {
        let total_sales = self.totals.read(|s| s.data.total_ventas);
        self.top.read(|s| {
            DonutChartData::from_amounts(
                s.data.iter().map(|p| (p.nombre.clone(), p.total_bs)),
                Some(total_sales),
            )
        })
    }
}

impl core::fmt::Debug for DashboardPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DashboardPage")
            .field("year", &self.year)
            .field("monthly", &self.monthly)
            .field("totals", &self.totals)
            .finish_non_exhaustive()
    }
}
