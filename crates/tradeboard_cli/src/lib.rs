//! Headless front end for the tradeboard pages.
//!
//! [`Command::parse`] reads the command line, [`execute`] syncs the matching
//! page once and returns its text rendering.

mod render;

use std::sync::Arc;
use tradeboard_api::Transport;
use tradeboard_views::{DashboardPage, ForecastsPage, Notifier, ProductsPage, PurchasesPage};

pub use render::{render_dashboard, render_forecasts, render_products, render_purchases};

/// Usage text.
pub const USAGE: &str = "\
Usage: tradeboard <command>

Commands:
  dashboard [year]          yearly overview
  products [page] [query]   product list with stock counters
  purchases [page]          purchase history
  forecasts                 stored forecasts";

/// Command-line errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// No command given.
    #[error("missing command")]
    Missing,
    /// Unknown command.
    #[error("unknown command: {0}")]
    Unknown(String),
    /// An argument is not a number.
    #[error("{name} must be a positive number, got {value:?}")]
    NotANumber {
        /// Argument name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// What to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Yearly overview, the newest year by default.
    Dashboard {
        /// Year to show.
        year: Option<i32>,
    },
    /// One page of products.
    Products {
        /// 1-based page.
        page: u32,
        /// Search text.
        query: Option<String>,
    },
    /// One page of purchases.
    Purchases {
        /// 1-based page.
        page: u32,
    },
    /// Stored forecasts.
    Forecasts,
}

impl Command {
    /// Parses the arguments after the program name.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] for a missing or unknown command and for
    /// numeric arguments that do not parse.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, UsageError> {
        let mut args = args.iter().map(AsRef::as_ref);
        let command = args.next().ok_or(UsageError::Missing)?;
        match command {
            "dashboard" => Ok(Self::Dashboard {
                year: args.next().map(|v| number("year", v)).transpose()?,
            }),
            "products" => Ok(Self::Products {
                page: args.next().map(|v| number("page", v)).transpose()?.unwrap_or(1),
                query: args.next().map(str::to_string),
            }),
            "purchases" => Ok(Self::Purchases {
                page: args.next().map(|v| number("page", v)).transpose()?.unwrap_or(1),
            }),
            "forecasts" => Ok(Self::Forecasts),
            other => Err(UsageError::Unknown(other.to_string())),
        }
    }
}

fn number<N: core::str::FromStr + PartialOrd + Default>(
    name: &'static str,
    value: &str,
) -> Result<N, UsageError> {
    value
        .parse::<N>()
        .ok()
        .filter(|n| *n > N::default())
        .ok_or_else(|| UsageError::NotANumber {
            name,
            value: value.to_string(),
        })
}

/// Syncs the page for `command` and renders it.
///
/// Pages other than the first are reached the way the pager does it: the
/// first sync learns the total, then the page moves and syncs again.
pub async fn execute(
    command: &Command,
    primary: Arc<dyn Transport>,
    forecast: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
) -> String {
    match command {
        Command::Dashboard { year } => {
            let mut page = DashboardPage::new(primary);
            if let Some(year) = year {
                page.set_year(*year);
            }
            page.sync().await;
            render_dashboard(&page)
        }
        Command::Products { page: number, query } => {
            let mut page = ProductsPage::new(primary, notifier);
            if let Some(query) = query {
                page.set_search(query);
            }
            page.sync().await;
            if *number > 1 {
                page.pagination_mut().go_to(*number);
                page.sync().await;
            }
            render_products(&page)
        }
        Command::Purchases { page: number } => {
            let mut page = PurchasesPage::new(primary, notifier);
            page.sync().await;
            if *number > 1 {
                page.pagination_mut().go_to(*number);
                page.sync().await;
            }
            render_purchases(&page)
        }
        Command::Forecasts => {
            let mut page = ForecastsPage::new(forecast, notifier);
            page.sync().await;
            render_forecasts(&page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse(&["dashboard", "2023"]),
            Ok(Command::Dashboard { year: Some(2023) })
        );
        assert_eq!(
            Command::parse(&["products", "2", "arroz"]),
            Ok(Command::Products {
                page: 2,
                query: Some("arroz".to_string())
            })
        );
        assert_eq!(Command::parse(&["purchases"]), Ok(Command::Purchases { page: 1 }));
        assert_eq!(Command::parse(&["forecasts"]), Ok(Command::Forecasts));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse::<&str>(&[]), Err(UsageError::Missing));
        assert_eq!(
            Command::parse(&["sales"]),
            Err(UsageError::Unknown("sales".to_string()))
        );
        assert!(matches!(
            Command::parse(&["products", "0"]),
            Err(UsageError::NotANumber { name: "page", .. })
        ));
    }
}
