//! Resource-backed pages.
//!
//! A page owns its hooks and UI state. `sync` observes every hook with the
//! current parameters and runs whatever fetches that started concurrently;
//! readers then render from the hooks' state.

mod dashboard;
mod forecasts;
mod products;
mod purchases;

pub use dashboard::{DashboardPage, NEWEST_YEAR, OLDEST_YEAR};
pub use forecasts::{ForecastsPage, forecast_chart, forecast_years, regenerate_body};
pub use products::ProductsPage;
pub use purchases::PurchasesPage;

use tradeboard_api::Transport;
use tradeboard_sync::{Commit, PendingFetch, Resource};

/// Executes a fetch if one was started.
async fn run<R: Resource>(pending: Option<PendingFetch<R>>, transport: &dyn Transport) -> Option<Commit> {
    match pending {
        Some(fetch) => Some(fetch.execute(transport).await),
        None => None,
    }
}
