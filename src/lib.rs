//! Client-side data layer for a purchases and sales dashboard.
//!
//! Layers, bottom up:
//!
//! | Module | Crate | Role |
//! |--------|-------|------|
//! | [`api`] | `tradeboard_api` | HTTP transport and backend error conventions |
//! | [`sync`] | `tradeboard_sync` | Resource hooks with a last-fetch-wins guard |
//! | [`metrics`] | `tradeboard_metrics` | Growth, shares, formatting and chart payloads |
//! | [`resources`] | `tradeboard_resources` | Every endpoint the pages read |
//! | [`views`] | `tradeboard_views` | Pages, pagination and CRUD flows |
//! | [`setup`] | `tradeboard_core` | Configuration and tracing setup |

/// Layer 1: HTTP transport.
pub use tradeboard_api as api;

/// Layer 1: resource hooks.
pub use tradeboard_sync as sync;

/// Layer 1: derived metrics.
pub use tradeboard_metrics as metrics;

/// Layer 1: configuration and tracing.
pub use tradeboard_core as setup;

/// Layer 2: endpoint descriptors and records.
pub use tradeboard_resources as resources;

/// Layer 3: pages.
pub use tradeboard_views as views;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use tradeboard_api::{ApiClient, ApiError, ApiRequest, BackendProfile, Transport};
    pub use tradeboard_core::{ClientConfig, Clients, TracingFormat, TracingSetup};
    pub use tradeboard_metrics::{DonutChartData, LineChartData, ProfitSummary, TrendSummary};
    pub use tradeboard_sync::{Phase, RefreshToken, RequestState, Resource, ResourceHook};
    pub use tradeboard_views::{
        CrudController, DashboardPage, ForecastsPage, NotificationLog, Notifier, ProductsPage,
        PurchasesPage, Session,
    };
}
