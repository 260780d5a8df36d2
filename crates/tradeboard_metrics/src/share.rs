//! Percentage shares and profit figures.

use serde::Serialize;

use crate::series::{Trend, round2};

/// Share of each amount in a grand total, in percent with two decimals.
///
/// The grand total is `external_total` when it is positive, otherwise the sum
/// of `amounts`. A non-positive grand total yields all zeros.
#[must_use]
pub fn percentage_shares(amounts: &[f64], external_total: Option<f64>) -> Vec<f64> {
    let grand = external_total
        .filter(|total| *total > 0.0)
        .unwrap_or_else(|| amounts.iter().sum());

    if grand > 0.0 {
        amounts.iter().map(|amount| round2(amount / grand * 100.0)).collect()
    } else {
        vec![0.0; amounts.len()]
    }
}

/// Gross profit derived from sales and purchase totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitSummary {
    /// `sales - purchases`.
    pub profit: f64,
    /// `profit / sales * 100` when sales are positive, else `0`.
    pub margin_pct: f64,
    /// `Up` when profit is not negative.
    pub trend: Trend,
}

impl ProfitSummary {
    /// Computes profit and margin.
    #[must_use]
    pub fn new(total_sales: f64, total_purchases: f64) -> Self {
        let profit = total_sales - total_purchases;
        let margin_pct = if total_sales > 0.0 {
            profit / total_sales * 100.0
        } else {
            0.0
        };
        Self {
            profit,
            margin_pct,
            trend: Trend::of_sign(profit),
        }
    }

    /// Margin label, e.g. `"+12.5% margin"` or `"-3.0% margin"`.
    #[must_use]
    pub fn margin_label(&self) -> String {
        let sign = if self.margin_pct >= 0.0 { "+" } else { "" };
        format!("{sign}{:.1}% margin", self.margin_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_of_external_total() {
        let shares = percentage_shares(&[50.0, 25.0], Some(200.0));
        assert_eq!(shares, vec![25.0, 12.5]);
    }

    #[test]
    fn shares_fall_back_to_sum() {
        assert_eq!(percentage_shares(&[1.0, 3.0], None), vec![25.0, 75.0]);
        assert_eq!(percentage_shares(&[1.0, 3.0], Some(0.0)), vec![25.0, 75.0]);
        assert_eq!(percentage_shares(&[1.0, 3.0], Some(-5.0)), vec![25.0, 75.0]);
    }

    #[test]
    fn shares_of_nothing_are_zero() {
        assert_eq!(percentage_shares(&[0.0, 0.0], None), vec![0.0, 0.0]);
        assert_eq!(percentage_shares(&[-2.0, 1.0], None), vec![0.0, 0.0]);
        assert!(percentage_shares(&[], Some(10.0)).is_empty());
    }

    #[test]
    fn shares_round_to_two_decimals() {
        let shares = percentage_shares(&[1.0, 1.0, 1.0], None);
        assert_eq!(shares, vec![33.33, 33.33, 33.33]);
    }

    #[test]
    fn profit_and_margin() {
        let summary = ProfitSummary::new(1000.0, 875.0);
        assert_eq!(summary.profit, 125.0);
        assert_eq!(summary.margin_pct, 12.5);
        assert_eq!(summary.trend, Trend::Up);
        assert_eq!(summary.margin_label(), "+12.5% margin");
    }

    #[test]
    fn loss_and_no_sales() {
        let loss = ProfitSummary::new(100.0, 103.0);
        assert_eq!(loss.trend, Trend::Down);
        assert_eq!(loss.margin_label(), "-3.0% margin");

        let idle = ProfitSummary::new(0.0, 40.0);
        assert_eq!(idle.margin_pct, 0.0);
        assert_eq!(idle.margin_label(), "+0.0% margin");
    }
}
