//! Pure computations behind the tradeboard views.
//!
//! Nothing here performs I/O. Every function takes plain numbers and returns
//! plain numbers, strings or serializable chart payloads.
//!
//! | Module | Provides |
//! |--------|----------|
//! | series | month-over-month growth, trend summaries |
//! | share | percentage shares, profit and margin |
//! | format | currency and number formatting |
//! | chart | line, growth and donut chart payloads |
//!
//! ```
//! use tradeboard_metrics::{format_currency, growth_series, percentage_shares};
//!
//! assert_eq!(growth_series(&[100.0, 150.0])[1], 50.0);
//! assert_eq!(percentage_shares(&[1.0, 3.0], None), vec![25.0, 75.0]);
//! assert_eq!(format_currency(1234.5), "1,234.50 Bs.");
//! ```

mod chart;
mod format;
mod series;
mod share;

pub use chart::{
    DONUT_COLORS, Dataset, DonutChartData, GROWTH_BAR_COLOR, GROWTH_LINE_COLOR, LineChartData,
    MONTH_LABELS, PURCHASES_COLOR, SALES_COLOR, SeriesKind, growth_chart, monthly_line_chart,
    year_options,
};
pub use format::{
    CURRENCY_SUFFIX, format_amount, format_currency, format_int, format_number, format_percent,
};
pub use series::{MONTHS, Trend, TrendSummary, growth_series, round1, round2, trend_summary};
pub use share::{ProfitSummary, percentage_shares};
