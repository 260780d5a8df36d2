//! Month-over-month growth and trend summaries.

use serde::Serialize;

/// Months in a reporting year.
pub const MONTHS: usize = 12;

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Month-over-month growth in percent.
///
/// Entry `i` is `(v[i] - v[i-1]) / v[i-1] * 100` rounded to one decimal when
/// `i > 0` and `v[i-1] > 0`, otherwise `0`. Entry 0 is always `0`. The output
/// has one entry per input value and at least [`MONTHS`] entries; missing
/// trailing months are `0`.
#[must_use]
pub fn growth_series(values: &[f64]) -> Vec<f64> {
    let mut growth = vec![0.0; values.len().max(MONTHS)];
    for (i, pair) in values.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        if prev > 0.0 {
            growth[i + 1] = round1((cur - prev) / prev * 100.0);
        }
    }
    growth
}

/// Direction of a series' most recent movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Latest value is at least the previous one.
    #[default]
    Up,
    /// Latest value dropped.
    Down,
}

impl Trend {
    /// Lowercase name, `"up"` or `"down"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// `Up` when `value >= 0`.
    #[must_use]
    pub fn of_sign(value: f64) -> Self {
        if value >= 0.0 { Self::Up } else { Self::Down }
    }
}

/// Sum of a series with its latest change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrendSummary {
    /// Sum of all entries.
    pub total: f64,
    /// Last non-zero entry, or `0`.
    pub last: f64,
    /// Nearest non-zero entry before `last`, or `0`.
    pub prev: f64,
    /// `(last - prev) / prev * 100` when `prev > 0`, else `0`.
    pub change_pct: f64,
    /// `Up` when `last >= prev`.
    pub trend: Trend,
}

/// Summarizes a series by its total and the change between its two most
/// recent non-zero entries.
///
/// Zero and NaN entries count as missing months.
#[must_use]
pub fn trend_summary(values: &[f64]) -> TrendSummary {
    let total = values.iter().filter(|v| !v.is_nan()).sum();

    let mut present = values.iter().rev().copied().filter(|v| *v != 0.0 && !v.is_nan());
    let last = present.next().unwrap_or(0.0);
    let prev = present.next().unwrap_or(0.0);

    let change_pct = if prev > 0.0 {
        (last - prev) / prev * 100.0
    } else {
        0.0
    };

    TrendSummary {
        total,
        last,
        prev,
        change_pct,
        trend: if last >= prev { Trend::Up } else { Trend::Down },
    }
}
